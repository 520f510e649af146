use std::fs;
use std::path::PathBuf;

use arff_model::{FeatureStats, FeatureType, Value};
use arff_read::{deserialize_dataset_async, read_dataset};
use tempfile::tempdir;

const WEATHER: &str = "@relation test\n\
                       @attribute a numeric\n\
                       @attribute Class {yes,no}\n\
                       @data\n\
                       1.0,yes\n\
                       2.0,no\n\
                       ?,yes\n";

#[test]
fn parses_end_to_end() {
    let dataset = read_dataset(WEATHER).unwrap();

    let header = dataset.header();
    assert_eq!(header.relation(), "test");
    assert_eq!(header.len(), 2);
    assert_eq!(header.feature(0).unwrap().ty, FeatureType::Numeric);
    assert_eq!(
        header.feature(1).unwrap().ty,
        FeatureType::Nominal {
            labels: vec!["yes".to_string(), "no".to_string()]
        }
    );
    assert_eq!(header.class_feature().unwrap().name, "Class");

    assert_eq!(dataset.num_instances(), 3);
    assert_eq!(
        dataset.get_column("a").unwrap(),
        vec![Some(1.0), Some(2.0), None]
    );
    assert_eq!(dataset.feature_stats(0).unwrap().missing_count(), 1);
    assert_eq!(
        dataset.get_classes().unwrap(),
        vec![Some(0), Some(1), Some(0)]
    );
}

#[test]
fn statistics_cover_every_feature() {
    let dataset = read_dataset(
        "@relation mixed\n\
         @attribute size integer\n\
         @attribute score numeric\n\
         @attribute note string\n\
         @attribute Class {a,b,c}\n\
         @data\n\
         1,0.5,'first',a\n\
         2,?,'second',a\n\
         ?,1.5,?,b\n",
    )
    .unwrap();

    assert_eq!(
        dataset.feature_stats(0).unwrap(),
        &FeatureStats::Numeric {
            missing: 1,
            min: 1.0,
            max: 2.0
        }
    );
    assert_eq!(
        dataset.feature_stats(1).unwrap(),
        &FeatureStats::Numeric {
            missing: 1,
            min: 0.5,
            max: 1.5
        }
    );
    assert_eq!(
        dataset.feature_stats(2).unwrap(),
        &FeatureStats::Plain { missing: 1 }
    );
    let FeatureStats::Nominal {
        missing,
        counts,
        probabilities,
        ratios,
    } = dataset.feature_stats(3).unwrap()
    else {
        panic!("expected nominal stats");
    };
    assert_eq!(*missing, 0);
    assert_eq!(counts, &[2, 1, 0]);
    assert_eq!(probabilities[0], 2.0 / 3.0);
    // "c" never occurs, so min(counts) is 0 and the ratios collapse to 0.
    assert_eq!(ratios, &[0.0, 0.0, 0.0]);

    let summary = dataset.summary();
    assert_eq!(summary.instances_with_missing, 2);
    assert_eq!(summary.total_missing_values, 3);
}

#[test]
fn mixed_dense_and_sparse_rows() {
    let dataset = read_dataset(
        "@relation t\n\
         @attribute a numeric\n\
         @attribute b numeric\n\
         @attribute c {x,y}\n\
         @data\n\
         1.0,2.0,y\n\
         {0 1.5, 2 y}\n\
         {}\n",
    )
    .unwrap();

    assert_eq!(
        dataset.get_column("b").unwrap(),
        vec![Some(2.0), Some(0.0), Some(0.0)]
    );
    assert_eq!(dataset.summary().instances_with_missing, 0);
}

#[test]
fn relational_values_roundtrip_through_the_model() {
    let dataset = read_dataset(
        "@relation bags\n\
         @attribute id integer\n\
         @attribute bag relational\n\
         @attribute v numeric\n\
         @end bag\n\
         @data\n\
         1,'0.5\\n1.5'\n",
    )
    .unwrap();

    let instance = &dataset.instances()[0];
    let Value::Rows(rows) = instance.get(1).unwrap() else {
        panic!("expected nested rows");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get(0).unwrap(), &Value::Real(1.5));

    let feature = dataset.header().feature(1).unwrap();
    assert_eq!(
        feature.ty.value_to_text(instance.get(1).unwrap()),
        "'0.5\\n1.5'"
    );
}

#[tokio::test]
async fn deserializes_asynchronously() {
    let dir = tempdir().unwrap();
    let path: PathBuf = dir.path().join("weather.arff");
    fs::write(&path, WEATHER).unwrap();

    let dataset = deserialize_dataset_async(path).await.unwrap();
    assert_eq!(dataset.num_instances(), 3);

    let absent = deserialize_dataset_async(dir.path().join("absent.arff"))
        .await
        .unwrap();
    assert_eq!(absent.num_instances(), 0);
}
