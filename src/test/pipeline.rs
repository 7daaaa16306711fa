#[cfg(test)]
mod tests {
    use crate::{
        app::{Pipeline, input::Encoding, report::HEADER},
        config::Config,
        error::{Diagnostic, RecordError},
        test::fixtures::export,
    };

    fn render(pipeline: &Pipeline, text: &str) -> String {
        let report = pipeline.run(text).unwrap();
        let mut out = Vec::new();
        report.write_csv(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn single_purchase_and_sale() {
        let text = export(&[
            ("2020-01-01", "KJØPT", "Fund", "X", "10", "-100,00"),
            ("2020-02-01", "SALG", "Fund", "X", "10", "150,00"),
        ]);
        let report = Pipeline::default().run(&text).unwrap();

        assert!(report.diagnostics().is_empty());
        assert_eq!(report.rows().len(), 1);
        let mut out = Vec::new();
        report.write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "{}\n\"0\",\"X\",\"Fund\",\"2020-01-01\",\"100.00\",\"10.000\",\"10.0000\",\"2020-02-01\",\"15.000\",\"50.00\"\n",
                HEADER
            )
        );
    }

    #[test]
    fn unmatched_sale_reports_without_aborting() {
        let text = export(&[
            ("2020-01-01", "KJØPT", "Other", "Y", "1", "-10,00"),
            ("2020-02-01", "SALG", "Fund", "X", "10", "150,00"),
        ]);
        let report = Pipeline::default().run(&text).unwrap();

        assert_eq!(report.rows().len(), 1);
        assert_eq!(report.rows()[0].isin(), "Y");
        assert_eq!(report.diagnostics().len(), 1);
        assert!(matches!(
            &report.diagnostics()[0],
            Diagnostic::InsufficientLots { isin, .. } if isin == "X"
        ));
        assert!(report.diagnostics()[0].to_string().contains("Fund"));
    }

    #[test]
    fn bad_rows_are_skipped_with_diagnostics() {
        let text = export(&[
            ("2020-01-01", "KJØPT", "Fund", "X", "10", "-100,00"),
            ("2020-01-02", "KJØPT", "Fund", "X", "ti", "-100,00"),
            ("2020-01-03", "KJØPT", "Fund", "X", "0", "-100,00"),
            ("2020-01-04", "UTBYTTE", "Fund", "X", "10", "5,00"),
            ("2020-02-01", "SALG", "Fund", "X", "4", "60,00"),
        ]);
        let report = Pipeline::default().run(&text).unwrap();

        assert_eq!(report.rows().len(), 2);
        let skipped: Vec<_> = report
            .diagnostics()
            .iter()
            .map(|diagnostic| match diagnostic {
                Diagnostic::Skipped(RecordError::Parse { row, .. }) => (*row, "parse"),
                Diagnostic::Skipped(RecordError::ZeroQuantity { row, .. }) => (*row, "zero"),
                other => panic!("unexpected diagnostic {other:?}"),
            })
            .collect();
        assert_eq!(skipped, vec![(2, "parse"), (3, "zero")]);
    }

    #[test]
    fn output_is_identical_across_runs() {
        let text = export(&[
            ("2020-01-01", "KJØPT", "Fund B", "B", "5", "-50,00"),
            ("2020-01-01", "KJØPT", "Fund A", "A", "3", "-30,00"),
            ("2020-01-01", "KJØPT", "Fund C", "C", "7", "-70,00"),
            ("2020-03-01", "SALG", "Fund A", "A", "1", "12,00"),
            ("2020-03-01", "SALG", "Fund C", "C", "2", "30,00"),
        ]);
        let pipeline = Pipeline::default();
        assert_eq!(render(&pipeline, &text), render(&pipeline, &text));
    }

    #[test]
    fn reads_utf16_export_with_custom_vocabulary() {
        let config = Config::from_json(
            r#"{
                "purchase_types": ["BUY"],
                "sale_types": ["SELL"],
                "columns": {
                    "transaction_type": "Type",
                    "security_name": "Name",
                    "quantity": "Qty",
                    "amount": "Amount",
                    "currency": "Currency",
                    "trade_date": "Date"
                }
            }"#,
        )
        .unwrap();
        let text = "Date;Type;Name;ISIN;Qty;Amount;Currency\n\
                    2020-01-01;BUY;Fund;X;2;-20.00;EUR\n\
                    2020-01-05;SELL;Fund;X;1;11.00;EUR\n";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let report = Pipeline::new(config)
            .with_encoding(Encoding::Auto)
            .run_bytes(&bytes)
            .unwrap();

        assert!(report.diagnostics().is_empty());
        assert_eq!(report.rows().len(), 2);
        assert_eq!(report.rows()[0].sale_date().as_deref(), None);
        assert_eq!(report.rows()[1].profit().as_deref(), Some("1.00"));
    }

    #[test]
    fn explicit_delimiter_overrides_detection() {
        let text = "Handelsdag,Transaksjonstype,Verdipapir,ISIN,Antall,Beløp,Valuta\n\
                    2020-01-01,KJØPT,Fund,X,\"1,5\",\"-15,00\",NOK\n";
        let report = Pipeline::default()
            .with_delimiter(Some(b','))
            .run(text)
            .unwrap();
        assert_eq!(report.rows()[0].quantity(), "1.5000");
        assert_eq!(report.rows()[0].price(), "10.000");
    }

    #[test]
    fn missing_columns_fail_the_run() {
        let err = Pipeline::default().run("Foo\tBar\n1\t2\n").unwrap_err();
        assert!(err.to_string().contains("Missing required column"));
    }
}
