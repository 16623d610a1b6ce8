//! Column name normalization.
//!
//! Raw headers are reduced to lowercase ASCII `snake_case` and then matched
//! against a fixed synonym table that collapses known variants to one
//! canonical name (`"¿Es_Fraude?"` → `fraude`, `"Score (1-5)"` → `score`).

use once_cell::sync::Lazy;

use crate::core::{Column, Table};
use crate::transformations::text::fold_diacritics;

/// Name used when a header has no alphanumeric content at all.
pub const UNNAMED_COLUMN: &str = "unnamed";

/// How a single header token is compared against a word list.
#[derive(Debug, Clone, Copy)]
enum TokenMatch {
    Exact(&'static [&'static str]),
    Prefix(&'static [&'static str]),
    Contains(&'static [&'static str]),
}

impl TokenMatch {
    fn matches(&self, token: &str) -> bool {
        match self {
            TokenMatch::Exact(words) => words.contains(&token),
            TokenMatch::Prefix(words) => words.iter().any(|w| token.starts_with(w)),
            TokenMatch::Contains(words) => words.iter().any(|w| token.contains(w)),
        }
    }
}

/// A canonical name and the token patterns that must all be present.
#[derive(Debug, Clone)]
struct SynonymRule {
    canonical: &'static str,
    requires: Vec<TokenMatch>,
}

impl SynonymRule {
    fn new(canonical: &'static str, requires: Vec<TokenMatch>) -> Self {
        Self { canonical, requires }
    }

    fn applies(&self, tokens: &[&str]) -> bool {
        self.requires
            .iter()
            .all(|pattern| tokens.iter().any(|token| pattern.matches(token)))
    }
}

/// Ordered rules; the first applicable one wins.
static SYNONYMS: Lazy<Vec<SynonymRule>> = Lazy::new(|| {
    use TokenMatch::*;
    vec![
        SynonymRule::new("score", vec![Prefix(&["score", "puntaje"])]),
        SynonymRule::new("fraude", vec![Contains(&["fraud"])]),
        SynonymRule::new(
            "comentarios",
            vec![Exact(&[
                "notes",
                "note",
                "notas",
                "nota",
                "comments",
                "comment",
                "comentario",
                "comentarios",
                "observaciones",
            ])],
        ),
        SynonymRule::new("monto", vec![Exact(&["monto", "amount", "importe"])]),
        SynonymRule::new(
            "fecha_registro",
            vec![Prefix(&["fech", "date"]), Prefix(&["regist"])],
        ),
        SynonymRule::new(
            "num_cliente",
            vec![
                Exact(&["num", "numero", "nro", "no", "id", "number"]),
                Exact(&["cliente", "client", "customer"]),
            ],
        ),
    ]
});

/// Normalize one raw header. Pure and total.
///
/// ```
/// use tabular_prep::transformations::normalize_header;
///
/// assert_eq!(normalize_header("Monto $$"), "monto");
/// assert_eq!(normalize_header("¿Es_Fraude?"), "fraude");
/// assert_eq!(normalize_header("Nombre Cliente (RAW)"), "nombre_cliente_raw");
/// ```
pub fn normalize_header(raw: &str) -> String {
    let mechanical = mechanical_name(raw);
    let tokens: Vec<&str> = mechanical.split('_').collect();

    SYNONYMS
        .iter()
        .find(|rule| rule.applies(&tokens))
        .map(|rule| rule.canonical.to_string())
        .unwrap_or(mechanical)
}

/// Lowercase ASCII `snake_case`.
///
/// Whitespace and `_` separate words; any other punctuation or symbol is
/// dropped in place, so `"E-mail"` becomes `email`.
fn mechanical_name(raw: &str) -> String {
    let folded = fold_diacritics(&raw.trim().to_lowercase());

    let mut name = String::with_capacity(folded.len());
    let mut pending_separator = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !name.is_empty() {
                name.push('_');
            }
            pending_separator = false;
            name.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '_' {
            pending_separator = true;
        }
    }

    if name.is_empty() {
        UNNAMED_COLUMN.to_string()
    } else {
        name
    }
}

/// Rename every column to its normalized header.
///
/// When two columns normalize to the same name the later one wins and takes
/// the position of the first; a warning is logged for each dropped column.
pub fn normalize_columns(table: Table) -> Table {
    let mut columns: Vec<Column> = Vec::with_capacity(table.width());

    for mut column in table.into_columns() {
        let raw = column.name().to_string();
        let normalized = normalize_header(&raw);
        column.rename(normalized.clone());

        match columns.iter().position(|c| c.name() == normalized) {
            Some(index) => {
                log::warn!(
                    "Column {:?} normalizes to {:?}, replacing an earlier column with the same name",
                    raw,
                    normalized
                );
                columns[index] = column;
            }
            None => columns.push(column),
        }
    }

    Table::from_columns_unchecked(columns)
}
