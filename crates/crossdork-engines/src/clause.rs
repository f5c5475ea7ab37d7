//! Declarative clause tables and the one routine that renders them.
//!
//! Each engine describes its filters as a table of [`ClauseRule`]s. A rule
//! names the field, one or more templates (`{v}` marks the value), how the
//! raw value is prepared and how several values collapse into one clause.
//! Cross-field quirks stay in the engine modules; everything else goes
//! through [`build_clause`] and [`assemble`].

use crossdork_core::{
    ConversionResult, Field, NormalizedFields, QueryError, Result, Scalar, WILDCARD_QUERY,
};

/// More clauses than this and a fallback query is offered.
pub const FALLBACK_THRESHOLD: usize = 5;

/// Number of leading clauses kept in the fallback query.
pub const FALLBACK_CLAUSES: usize = 3;

/// Note attached when nothing usable was supplied.
pub const NO_FIELDS_NOTE: &str = "No fields provided; the query matches everything";

/// Note attached when a fallback query was produced.
pub const SIMPLIFIED_NOTE: &str =
    "Query has more than 5 filters; the fallback keeps only the first 3";

const PLACEHOLDER: &str = "{v}";

/// Boolean tokens of an engine's query grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Engine id, used in error messages
    pub engine: &'static str,
    /// Top-level conjunction, including surrounding whitespace
    pub and: &'static str,
    /// Disjunction inside a multi-value group
    pub or: &'static str,
    /// How the conjunction is named in notes
    pub and_label: &'static str,
}

impl Dialect {
    /// Join clauses with the top-level conjunction.
    #[must_use]
    pub fn join_and(&self, clauses: &[String]) -> String {
        clauses.join(self.and)
    }

    /// Combine alternatives into one clause, parenthesized when there is
    /// more than one.
    #[must_use]
    pub fn any_of(&self, alternatives: &[String]) -> String {
        match alternatives {
            [single] => single.clone(),
            many => format!("({})", many.join(self.or)),
        }
    }
}

/// How a raw value is prepared before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Used as given
    Text,
    /// Autonomous system number: `AS` prefix stripped, digits only
    Asn,
    /// Flag: any truthy value emits the template once, without a value
    Flag,
    /// Upper-cased
    Upper,
}

/// How several values for one field become one clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multi {
    /// `(t(a) OR t(b))` using the dialect's disjunction
    Or,
    /// First template rendered once with the values joined by a separator,
    /// e.g. `port:80,443`
    Joined(&'static str),
    /// Brace set after a prefix, e.g. `host.services.port:{"80", "443"}`
    Set(&'static str),
}

/// One row of an engine's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseRule {
    /// Field this rule renders
    pub field: Field,
    /// Templates; more than one means the value is matched on any path
    pub paths: &'static [&'static str],
    /// Value preparation
    pub kind: ValueKind,
    /// Multi-value strategy
    pub multi: Multi,
}

impl ClauseRule {
    /// Text rule with OR-grouping for several values.
    #[must_use]
    pub const fn new(field: Field, paths: &'static [&'static str]) -> Self {
        Self {
            field,
            paths,
            kind: ValueKind::Text,
            multi: Multi::Or,
        }
    }

    /// Set the value preparation.
    #[must_use]
    pub const fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the multi-value strategy.
    #[must_use]
    pub const fn multi(mut self, multi: Multi) -> Self {
        self.multi = multi;
        self
    }

    /// Same templates, applied to another field's values.
    #[must_use]
    pub const fn for_field(mut self, field: Field) -> Self {
        self.field = field;
        self
    }

    /// Prepared values for this rule, empty when the field is absent.
    #[must_use]
    pub fn values(&self, fields: &NormalizedFields) -> Vec<String> {
        match self.kind {
            ValueKind::Text => fields.values(self.field),
            ValueKind::Upper => fields
                .values(self.field)
                .into_iter()
                .map(|v| v.to_uppercase())
                .collect(),
            ValueKind::Asn => fields
                .values(self.field)
                .iter()
                .filter_map(|v| normalize_asn(v))
                .collect(),
            ValueKind::Flag => {
                let set = fields
                    .get(self.field)
                    .is_some_and(|v| v.scalars().any(Scalar::is_truthy));
                if set {
                    vec![String::new()]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

/// Strip an `AS` prefix and keep the number. Non-numeric input yields `None`.
#[must_use]
pub fn normalize_asn(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let digits = match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("as") => &trimmed[2..],
        _ => trimmed,
    };
    let digits = digits.trim();
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then(|| digits.to_string())
}

/// Escape a value placed between double quotes.
#[must_use]
pub fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Substitute a value into a template. Quoted templates get their value
/// escaped; bare templates take it verbatim.
pub fn render(dialect: &Dialect, rule: &ClauseRule, template: &str, value: &str) -> Result<String> {
    if rule.kind == ValueKind::Flag {
        return Ok(template.to_string());
    }
    if !template.contains(PLACEHOLDER) {
        return Err(QueryError::conversion(
            dialect.engine,
            format!("template for {} has no value placeholder: {template}", rule.field),
        ));
    }
    let value = if template.contains('"') {
        escape_quoted(value)
    } else {
        value.to_string()
    };
    Ok(template.replace(PLACEHOLDER, &value))
}

/// Render the clause for one rule, or `None` when the field is absent.
pub fn build_clause(
    dialect: &Dialect,
    rule: &ClauseRule,
    fields: &NormalizedFields,
) -> Result<Option<String>> {
    let values = rule.values(fields);
    if values.is_empty() {
        return Ok(None);
    }
    build_from_values(dialect, rule, &values).map(Some)
}

/// Render the clause for already prepared values.
pub fn build_from_values(dialect: &Dialect, rule: &ClauseRule, values: &[String]) -> Result<String> {
    let Some(first) = rule.paths.first() else {
        return Err(QueryError::conversion(
            dialect.engine,
            format!("no template for {}", rule.field),
        ));
    };

    if values.len() > 1 {
        match rule.multi {
            Multi::Joined(separator) => {
                return render(dialect, rule, first, &values.join(separator));
            }
            Multi::Set(prefix) => {
                let members: Vec<String> = values
                    .iter()
                    .map(|v| format!("\"{}\"", escape_quoted(v)))
                    .collect();
                return Ok(format!("{prefix}{{{}}}", members.join(", ")));
            }
            Multi::Or => {}
        }
    }

    let mut alternatives = Vec::with_capacity(values.len() * rule.paths.len());
    for value in values {
        for template in rule.paths {
            alternatives.push(render(dialect, rule, template, value)?);
        }
    }
    alternatives.dedup();
    Ok(dialect.any_of(&alternatives))
}

/// Join clauses into the final result, adding the standard notes and the
/// fallback query.
#[must_use]
pub fn assemble(dialect: &Dialect, clauses: &[String]) -> ConversionResult {
    if clauses.is_empty() {
        let mut result = ConversionResult::new(WILDCARD_QUERY);
        result.note(NO_FIELDS_NOTE);
        return result;
    }

    let mut result = ConversionResult::new(dialect.join_and(clauses));
    if clauses.len() > 1 {
        result.note(format!(
            "Multiple filters combined with {} logic",
            dialect.and_label
        ));
    }
    if clauses.len() > FALLBACK_THRESHOLD {
        result.fallback = Some(dialect.join_and(&clauses[..FALLBACK_CLAUSES]));
        result.note(SIMPLIFIED_NOTE);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST: Dialect = Dialect {
        engine: "test",
        and: " AND ",
        or: " OR ",
        and_label: "AND",
    };

    #[test]
    fn test_normalize_asn() {
        assert_eq!(normalize_asn("AS13335").as_deref(), Some("13335"));
        assert_eq!(normalize_asn("as 15169").as_deref(), Some("15169"));
        assert_eq!(normalize_asn("13335").as_deref(), Some("13335"));
        assert_eq!(normalize_asn("ASN"), None);
        assert_eq!(normalize_asn("AS"), None);
        assert_eq!(normalize_asn("cloudflare"), None);
    }

    #[test]
    fn test_single_and_or_group() {
        let rule = ClauseRule::new(Field::Org, &["org:\"{v}\""]);
        let one = NormalizedFields::new().with(Field::Org, "Acme");
        assert_eq!(build_clause(&TEST, &rule, &one).unwrap().unwrap(), "org:\"Acme\"");

        let two = NormalizedFields::new().with(Field::Org, vec!["A", "B"]);
        assert_eq!(
            build_clause(&TEST, &rule, &two).unwrap().unwrap(),
            "(org:\"A\" OR org:\"B\")"
        );
    }

    #[test]
    fn test_quoted_values_are_escaped() {
        let rule = ClauseRule::new(Field::Title, &["title:\"{v}\""]);
        let fields = NormalizedFields::new().with(Field::Title, r#"say "hi""#);
        assert_eq!(
            build_clause(&TEST, &rule, &fields).unwrap().unwrap(),
            r#"title:"say \"hi\"""#
        );
    }

    #[test]
    fn test_joined_and_set_strategies() {
        let ports = NormalizedFields::new().with(Field::Port, vec![80, 443]);

        let joined = ClauseRule::new(Field::Port, &["port:{v}"]).multi(Multi::Joined(","));
        assert_eq!(build_clause(&TEST, &joined, &ports).unwrap().unwrap(), "port:80,443");

        let set = ClauseRule::new(Field::Port, &["p:{v}"]).multi(Multi::Set("p:"));
        assert_eq!(build_clause(&TEST, &set, &ports).unwrap().unwrap(), "p:{\"80\", \"443\"}");

        let single = NormalizedFields::new().with(Field::Port, 22);
        assert_eq!(build_clause(&TEST, &set, &single).unwrap().unwrap(), "p:22");
    }

    #[test]
    fn test_dual_paths() {
        let rule = ClauseRule::new(Field::Product, &["a: \"{v}\"", "b: \"{v}\""]);
        let fields = NormalizedFields::new().with(Field::Product, "nginx");
        assert_eq!(
            build_clause(&TEST, &rule, &fields).unwrap().unwrap(),
            "(a: \"nginx\" OR b: \"nginx\")"
        );
    }

    #[test]
    fn test_flag_kind() {
        let rule = ClauseRule::new(Field::ExpiredCert, &["expired:true"]).kind(ValueKind::Flag);
        let on = NormalizedFields::new().with(Field::ExpiredCert, true);
        let off = NormalizedFields::new().with(Field::ExpiredCert, "false");
        assert_eq!(build_clause(&TEST, &rule, &on).unwrap().unwrap(), "expired:true");
        assert_eq!(build_clause(&TEST, &rule, &off).unwrap(), None);
    }

    #[test]
    fn test_missing_placeholder_is_an_error() {
        let rule = ClauseRule::new(Field::City, &["city:"]);
        let fields = NormalizedFields::new().with(Field::City, "Paris");
        let err = build_clause(&TEST, &rule, &fields).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_assemble_empty() {
        let result = assemble(&TEST, &[]);
        assert_eq!(result.query, "*");
        assert_eq!(result.notes, vec![NO_FIELDS_NOTE]);
        assert!(result.fallback.is_none());
    }

    #[test]
    fn test_assemble_fallback_threshold() {
        let five: Vec<String> = (1..=5).map(|i| format!("c{i}")).collect();
        let result = assemble(&TEST, &five);
        assert!(result.fallback.is_none());
        assert_eq!(result.notes, vec!["Multiple filters combined with AND logic"]);

        let six: Vec<String> = (1..=6).map(|i| format!("c{i}")).collect();
        let result = assemble(&TEST, &six);
        assert_eq!(result.fallback.as_deref(), Some("c1 AND c2 AND c3"));
        assert_eq!(result.notes.last().map(String::as_str), Some(SIMPLIFIED_NOTE));
    }
}
