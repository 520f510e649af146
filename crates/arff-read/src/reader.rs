//! Recursive grammar reader: header (schema) then instances (rows).
//!
//! The reader walks the linear state machine `Start -> Data -> Done` with one
//! token of lookahead and no backtracking. A reader is bound to one stream
//! and one logical thread of control; misusing the sequence (rows before the
//! header, header twice) is a usage error distinct from malformed input.

use std::sync::Arc;

use arff_model::{DEFAULT_DATE_FORMAT, Dataset, Feature, FeatureType, Header, Instance, Value};

use crate::error::{ReadError, Result};
use crate::tokenizer::{Token, Tokenizer};

const RELATION_KEYWORD: &str = "@relation";
const ATTRIBUTE_KEYWORD: &str = "@attribute";
const DATA_KEYWORD: &str = "@data";
const END_KEYWORD: &str = "@end";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Data,
    Done,
}

/// Streaming ARFF reader over a borrowed source string.
pub struct ArffReader<'a> {
    tokens: Tokenizer<'a>,
    state: State,
    header: Option<Arc<Header>>,
}

impl<'a> ArffReader<'a> {
    /// Create a reader over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(source),
            state: State::Start,
            header: None,
        }
    }

    /// Reader over the body of a relational value: the schema is already
    /// known and `source` contains only rows.
    fn nested(source: &'a str, header: Arc<Header>) -> Self {
        Self {
            tokens: Tokenizer::new(source),
            state: State::Data,
            header: Some(header),
        }
    }

    /// Read the `@relation` line and attribute declarations up to `@data`.
    ///
    /// Calling this twice is a usage error.
    pub fn read_header(&mut self) -> Result<Arc<Header>> {
        if self.state != State::Start {
            return Err(ReadError::HeaderAlreadyRead);
        }

        match self.next_content_token()? {
            Token::Word { text, .. } if text.eq_ignore_ascii_case(RELATION_KEYWORD) => {}
            other => return Err(ReadError::unexpected(other.describe(), "@relation")),
        }
        let relation = self.expect_word("relation name")?;
        self.expect_end_of_line()?;

        let mut features = Vec::new();
        loop {
            match self.next_content_token()? {
                Token::Word { text, .. } if text.eq_ignore_ascii_case(ATTRIBUTE_KEYWORD) => {
                    features.push(self.parse_attribute()?);
                }
                Token::Word { text, .. } if text.eq_ignore_ascii_case(DATA_KEYWORD) => break,
                other => {
                    return Err(ReadError::unexpected(
                        other.describe(),
                        "@attribute or @data",
                    ));
                }
            }
        }
        self.expect_end_of_line()?;

        if features.is_empty() {
            return Err(ReadError::EmptyAttributeList);
        }

        let header = Arc::new(Header::new(relation, features));
        self.header = Some(Arc::clone(&header));
        self.state = State::Data;
        Ok(header)
    }

    /// Read the next data row, or `None` at end of input.
    ///
    /// Calling this before [`read_header`](Self::read_header) is a usage
    /// error.
    pub fn read_instance(&mut self) -> Result<Option<Instance>> {
        let header = match self.state {
            State::Start => return Err(ReadError::HeaderNotRead),
            State::Done => return Ok(None),
            State::Data => Arc::clone(self.header.as_ref().expect("header set in Data state")),
        };

        match self.next_content_token()? {
            Token::EndOfFile => {
                self.state = State::Done;
                Ok(None)
            }
            token if token.is_structural("{") => self.read_sparse(&header).map(Some),
            first => self.read_dense(&header, first).map(Some),
        }
    }

    /// One attribute declaration: name, type, end of line.
    fn parse_attribute(&mut self) -> Result<Feature> {
        let name = self.expect_word("attribute name")?;
        let token = self.tokens.next_token()?;

        if token.is_structural("{") {
            let labels = self.parse_nominal_labels()?;
            self.expect_end_of_line()?;
            return Ok(Feature::nominal(name, labels));
        }

        let Token::Word { text: keyword, .. } = token else {
            return Err(ReadError::UnexpectedEndOfLine {
                expected: "attribute type",
            });
        };

        let feature = match keyword.to_ascii_lowercase().as_str() {
            "integer" => {
                self.expect_end_of_line()?;
                Feature::integer(name)
            }
            "numeric" | "real" => {
                self.expect_end_of_line()?;
                Feature::numeric(name)
            }
            "string" => {
                self.expect_end_of_line()?;
                Feature::string(name)
            }
            "date" => {
                let format = match self.tokens.next_token()? {
                    Token::Word { text, .. } => {
                        self.expect_end_of_line()?;
                        text
                    }
                    Token::EndOfLine | Token::EndOfFile => DEFAULT_DATE_FORMAT.to_string(),
                };
                Feature::date(name, format)
            }
            "relational" => {
                self.expect_end_of_line()?;
                let children = self.parse_relational_children(&name)?;
                Feature::relational(name, children)
            }
            _ => {
                return Err(ReadError::UnknownType {
                    keyword,
                    feature: name,
                });
            }
        };
        Ok(feature)
    }

    /// Comma-separated labels after an opening `{`, terminated by `}`.
    fn parse_nominal_labels(&mut self) -> Result<Vec<String>> {
        let mut labels = Vec::new();
        loop {
            let token = self.tokens.next_token()?;
            if token.is_structural("}") {
                break;
            }
            match token {
                Token::Word { text, .. } => labels.push(text),
                other => {
                    return Err(ReadError::unexpected(
                        other.describe(),
                        "nominal label or '}'",
                    ));
                }
            }
            let separator = self.tokens.next_token()?;
            if separator.is_structural("}") {
                break;
            }
            if !separator.is_structural(",") {
                return Err(ReadError::unexpected(
                    separator.describe(),
                    "',' or '}' in label list",
                ));
            }
        }
        Ok(labels)
    }

    /// Nested `@attribute` declarations up to `@end <name>`.
    fn parse_relational_children(&mut self, name: &str) -> Result<Vec<Feature>> {
        let mut children = Vec::new();
        loop {
            match self.next_content_token()? {
                Token::Word { text, .. } if text.eq_ignore_ascii_case(ATTRIBUTE_KEYWORD) => {
                    children.push(self.parse_attribute()?);
                }
                Token::Word { text, .. } if text.eq_ignore_ascii_case(END_KEYWORD) => {
                    let end_name = self.expect_word("relational end name")?;
                    if end_name != name {
                        return Err(ReadError::RelationalEndMismatch {
                            feature: name.to_string(),
                            found: end_name,
                        });
                    }
                    self.expect_end_of_line()?;
                    break;
                }
                other => {
                    return Err(ReadError::unexpected(other.describe(), "@attribute or @end"));
                }
            }
        }
        if children.is_empty() {
            return Err(ReadError::EmptyAttributeList);
        }
        Ok(children)
    }

    /// Dense row: one positional value per feature, comma separated.
    fn read_dense(&mut self, header: &Arc<Header>, first: Token) -> Result<Instance> {
        let mut instance = Instance::new(Arc::clone(header));
        self.assign_value(&mut instance, 0, first)?;
        for index in 1..header.len() {
            self.expect_structural(",")?;
            let token = self.tokens.next_token()?;
            self.assign_value(&mut instance, index, token)?;
        }
        let weight = self.read_row_end()?;
        instance.set_weight(weight);
        Ok(instance)
    }

    /// Sparse row: `index value` pairs inside braces; unlisted features keep
    /// their type's default and are not marked missing.
    fn read_sparse(&mut self, header: &Arc<Header>) -> Result<Instance> {
        let mut instance = Instance::new(Arc::clone(header));
        for (index, feature) in header.features().iter().enumerate() {
            let default = feature.ty.default_sparse_value();
            if !default.is_missing() {
                instance.set(index, default)?;
            }
        }

        loop {
            let token = self.tokens.next_token()?;
            if token.is_structural("}") {
                break;
            }
            let index = match token {
                Token::Word { text, quoted: false } => {
                    text.parse::<usize>()
                        .map_err(|_| ReadError::unexpected(text, "sparse feature index"))?
                }
                other => {
                    return Err(ReadError::unexpected(
                        other.describe(),
                        "sparse feature index or '}'",
                    ));
                }
            };
            if index >= header.len() {
                return Err(ReadError::SparseIndexOutOfRange {
                    index,
                    count: header.len(),
                });
            }
            let value = self.tokens.next_token()?;
            self.assign_value(&mut instance, index, value)?;

            let separator = self.tokens.next_token()?;
            if separator.is_structural("}") {
                break;
            }
            if !separator.is_structural(",") {
                return Err(ReadError::unexpected(separator.describe(), "',' or '}'"));
            }
        }

        let weight = self.read_row_end()?;
        instance.set_weight(weight);
        Ok(instance)
    }

    /// Parse one value token against the feature at `index` and store it.
    ///
    /// An unquoted `?` is missing regardless of the declared type.
    fn assign_value(&mut self, instance: &mut Instance, index: usize, token: Token) -> Result<()> {
        let Token::Word { text, quoted } = token else {
            return Err(ReadError::UnexpectedEndOfLine { expected: "value" });
        };
        if !quoted && text == "?" {
            instance.set_missing(index)?;
            return Ok(());
        }
        let feature = instance.header().feature(index)?.clone();
        let value = match &feature.ty {
            FeatureType::Relational { children } => {
                self.parse_relational_value(&feature.name, children, &text)?
            }
            ty => ty.parse_scalar(&text, &feature.name)?,
        };
        instance.set(index, value)?;
        Ok(())
    }

    /// Parse a relational token's text as rows over the child schema.
    fn parse_relational_value(
        &mut self,
        name: &str,
        children: &[Feature],
        text: &str,
    ) -> Result<Value> {
        let child_header = Arc::new(Header::new(name, children.to_vec()));
        let mut nested = ArffReader::nested(text, child_header);
        let mut rows = Vec::new();
        while let Some(row) = nested.read_instance()? {
            rows.push(row);
        }
        Ok(Value::Rows(rows))
    }

    /// Consume a row's terminator, with an optional `, {weight}` suffix.
    fn read_row_end(&mut self) -> Result<f64> {
        match self.tokens.next_token()? {
            Token::EndOfLine | Token::EndOfFile => Ok(1.0),
            token if token.is_structural(",") => {
                self.expect_structural("{")?;
                let raw = self.expect_word("row weight")?;
                let weight = raw
                    .parse::<f64>()
                    .map_err(|_| ReadError::InvalidWeight { token: raw })?;
                self.expect_structural("}")?;
                self.expect_end_of_line()?;
                Ok(weight)
            }
            other => Err(ReadError::ExpectedEndOfLine {
                found: other.describe(),
            }),
        }
    }

    /// Next token, skipping blank and comment lines.
    fn next_content_token(&mut self) -> Result<Token> {
        loop {
            let token = self.tokens.next_token()?;
            if token != Token::EndOfLine {
                return Ok(token);
            }
        }
    }

    /// Require a word token; yields its text.
    fn expect_word(&mut self, expected: &'static str) -> Result<String> {
        match self.tokens.next_token()? {
            Token::Word { text, .. } => Ok(text),
            Token::EndOfLine | Token::EndOfFile => {
                Err(ReadError::UnexpectedEndOfLine { expected })
            }
        }
    }

    /// Require the unquoted structural word `symbol`.
    fn expect_structural(&mut self, symbol: &'static str) -> Result<()> {
        let token = self.tokens.next_token()?;
        if token.is_structural(symbol) {
            Ok(())
        } else {
            Err(ReadError::unexpected(token.describe(), symbol))
        }
    }

    /// Require end of line (end of file also terminates a line).
    fn expect_end_of_line(&mut self) -> Result<()> {
        match self.tokens.next_token()? {
            Token::EndOfLine | Token::EndOfFile => Ok(()),
            Token::Word { text, .. } => Err(ReadError::ExpectedEndOfLine { found: text }),
        }
    }
}

/// Parse a complete ARFF source into a dataset, computing statistics.
pub fn read_dataset(source: &str) -> Result<Dataset> {
    let mut reader = ArffReader::new(source);
    let header = reader.read_header()?;
    let mut instances = Vec::new();
    while let Some(instance) = reader.read_instance()? {
        instances.push(instance);
    }
    Ok(Dataset::new(header, instances))
}

/// Parse a complete ARFF source into its instances only.
pub fn read_instances(source: &str) -> Result<Vec<Instance>> {
    let mut reader = ArffReader::new(source);
    reader.read_header()?;
    let mut instances = Vec::new();
    while let Some(instance) = reader.read_instance()? {
        instances.push(instance);
    }
    Ok(instances)
}
