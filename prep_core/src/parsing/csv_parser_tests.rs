#[cfg(test)]
mod tests {
    use crate::core::{Cell, ColumnKind};
    use crate::io::LoadOptions;
    use crate::parsing::csv_parser::{decode, parse_delimited, parse_delimited_bytes};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to create a temp CSV file
    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content).unwrap();
        temp_file
    }

    #[test]
    fn test_parse_basic_shape() {
        let temp_file = create_temp_csv(b"a,b\n1,2\n3,4");
        let table = parse_delimited(temp_file.path(), &LoadOptions::default()).unwrap();

        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_numeric_and_text_columns() {
        let csv = "Monto $$,Score (1-5),¿Es_Fraude?\n\"$1,000\",Uno,0\n$2000,Dos,1\n";
        let table = parse_delimited_bytes(csv.as_bytes(), &LoadOptions::default()).unwrap();

        let monto = table.column("Monto $$").unwrap();
        assert_eq!(monto.kind(), ColumnKind::Text);
        assert_eq!(monto.get(0), Some(&Cell::text("$1,000")));

        let fraude = table.column("¿Es_Fraude?").unwrap();
        assert_eq!(fraude.kind(), ColumnKind::Numeric);
        assert_eq!(fraude.get(1), Some(&Cell::Number(1.0)));
    }

    #[test]
    fn test_empty_fields_are_missing() {
        let csv = "a,b\n1,\n,x\n";
        let table = parse_delimited_bytes(csv.as_bytes(), &LoadOptions::default()).unwrap();

        assert!(table.column("a").unwrap().get(1).unwrap().is_missing());
        assert!(table.column("b").unwrap().get(0).unwrap().is_missing());
    }

    /// A blank-but-not-empty cell makes Polars read the whole column as text;
    /// standardizing missing values rewrites that cell but keeps the type.
    #[test]
    fn test_whitespace_cell_keeps_numeric_column_as_text() {
        let csv = "id,fraude\n1,0\n2, \n3,1\n";
        let table = parse_delimited_bytes(csv.as_bytes(), &LoadOptions::default()).unwrap();

        let fraude = table.column("fraude").unwrap();
        assert_eq!(fraude.kind(), ColumnKind::Text);
        assert_eq!(fraude.get(0), Some(&Cell::text("0")));
        assert_eq!(fraude.get(1), Some(&Cell::text(" ")));

        let table = crate::transformations::to_missing(table);
        let fraude = table.column("fraude").unwrap();
        assert_eq!(fraude.kind(), ColumnKind::Text);
        assert!(fraude.get(1).unwrap().is_missing());
        assert_eq!(fraude.get(2), Some(&Cell::text("1")));
        assert!(table.column("id").unwrap().is_numeric());
    }

    #[test]
    fn test_custom_delimiter() {
        let options = LoadOptions {
            delimiter: ';',
            ..LoadOptions::default()
        };
        let table = parse_delimited_bytes(b"a;b\n1;2\n", &options).unwrap();
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_headerless_columns_get_generated_names() {
        let options = LoadOptions {
            has_header: false,
            ..LoadOptions::default()
        };
        let table = parse_delimited_bytes(b"1,2\n3,4\n", &options).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.column_names(), vec!["column_1", "column_2"]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "José" encoded as windows-1252
        let bytes = b"nombre\nJos\xe9\n";
        let options = LoadOptions {
            encoding: "latin1".to_string(),
            ..LoadOptions::default()
        };
        let table = parse_delimited_bytes(bytes, &options).unwrap();
        assert_eq!(
            table.column("nombre").unwrap().get(0),
            Some(&Cell::text("José"))
        );
    }

    #[test]
    fn test_unknown_encoding_fails() {
        let result = decode(b"a", "not-an-encoding");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_ascii_delimiter_fails() {
        let options = LoadOptions {
            delimiter: '¦',
            ..LoadOptions::default()
        };
        assert!(parse_delimited_bytes(b"a\n1\n", &options).is_err());
    }

    #[test]
    fn test_missing_file_fails() {
        let result = parse_delimited(
            std::path::Path::new("/nonexistent/path/data.csv"),
            &LoadOptions::default(),
        );
        assert!(result.is_err());
    }
}
