use std::fs;

use seatbook_core::models::*;
use seatbook_core::store::ReservationStore;
use seatbook_core::table::{ReservationTable, SheetFile, TableError};
use serde_json::json;
use speculate2::speculate;

const DAY: &str = "01/01/2030";

fn record(seat_number: u32, name: &str, day: &str) -> ReservationRecord {
    ReservationRecord {
        seat_number,
        holder_name: name.to_string(),
        holder_document: "111".to_string(),
        day: day.to_string(),
    }
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("reservations.json");
    }

    describe "create" {
        it "writes a sheet holding only the header" {
            SheetFile::create(&path, "Reservations").expect("Failed to create workbook");

            let content: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
            assert_eq!(
                content,
                json!({ "sheets": { "Reservations": [["seat_number", "holder_name", "holder_document", "day"]] } })
            );
        }

        it "refuses to overwrite an existing file" {
            SheetFile::create(&path, "Reservations").expect("Failed to create workbook");
            let result = SheetFile::create(&path, "Reservations");
            assert!(matches!(result, Err(TableError::AlreadyExists(_))));
        }

        it "creates missing parent directories" {
            let nested = dir.path().join("a/b/reservations.json");
            SheetFile::create(&nested, "Reservations").expect("Failed to create workbook");
            assert!(nested.exists());
        }
    }

    describe "missing file" {
        it "turns every operation into a no-op" {
            let sheet = SheetFile::new(&path);

            sheet.append_row(&record(1, "Ana", DAY)).expect("Append should be a no-op");
            assert!(!sheet.delete_first_matching(1, DAY).expect("Delete should be a no-op"));
            assert!(sheet.scan_all().expect("Scan should be empty").is_empty());
            assert!(!path.exists());
        }
    }

    describe "rows" {
        before {
            let sheet = SheetFile::create(&path, "Reservations").expect("Failed to create workbook");
        }

        it "scans appended rows in order without the header" {
            sheet.append_row(&record(1, "Ana", DAY)).unwrap();
            sheet.append_row(&record(2, "Bob", DAY)).unwrap();

            let rows = sheet.scan_all().unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].seat_number, Some(1));
            assert_eq!(rows[1].holder_name, "Bob");
        }

        it "deletes the first matching row and keeps the rest in order" {
            sheet.append_row(&record(1, "Ana", DAY)).unwrap();
            sheet.append_row(&record(2, "Bob", DAY)).unwrap();
            sheet.append_row(&record(1, "Cid", DAY)).unwrap();

            assert!(sheet.delete_first_matching(1, DAY).unwrap());

            let names: Vec<String> = sheet.scan_all().unwrap().into_iter().map(|r| r.holder_name).collect();
            assert_eq!(names, vec!["Bob", "Cid"]);
        }

        it "reports when nothing matched" {
            sheet.append_row(&record(1, "Ana", DAY)).unwrap();
            assert!(!sheet.delete_first_matching(1, "02/01/2030").unwrap());
            assert_eq!(sheet.scan_all().unwrap().len(), 1);
        }

        it "leaves no temporary file behind" {
            sheet.append_row(&record(1, "Ana", DAY)).unwrap();
            let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
            assert_eq!(entries.len(), 1);
        }
    }

    describe "hand-edited workbooks" {
        it "reads malformed rows without failing" {
            fs::write(&path, json!({ "sheets": { "Reservations": [
                ["seat_number", "holder_name", "holder_document", "day"],
                [null, "Nobody", "0", DAY],
                ["3", "Text seat", "0", DAY],
                [4.0, "Float seat", 123, DAY],
                [5]
            ] } }).to_string()).unwrap();

            let rows = SheetFile::new(&path).scan_all().unwrap();
            assert_eq!(rows.len(), 4);
            assert_eq!(rows[0].seat_number, None);
            assert_eq!(rows[1].seat_number, None);
            assert_eq!(rows[2].seat_number, Some(4));
            assert_eq!(rows[2].holder_document, "123");
            assert_eq!(rows[3].day, "");
        }

        it "adds a header before the first row of an empty sheet" {
            fs::write(&path, json!({ "sheets": { "Reservations": [] } }).to_string()).unwrap();
            let sheet = SheetFile::new(&path);

            sheet.append_row(&record(1, "Ana", DAY)).unwrap();

            assert_eq!(sheet.scan_all().unwrap().len(), 1);
        }

        it "fails when the sheet is missing" {
            fs::write(&path, json!({ "sheets": { "Other": [] } }).to_string()).unwrap();
            let result = SheetFile::new(&path).scan_all();
            assert!(matches!(result, Err(TableError::MissingSheet { .. })));
        }

        it "fails on unparsable content" {
            fs::write(&path, "not json").unwrap();
            let result = SheetFile::new(&path).scan_all();
            assert!(matches!(result, Err(TableError::Parse { .. })));
        }

        it "uses a custom sheet name" {
            let sheet = SheetFile::create(&path, "Trip").expect("Failed to create workbook");
            sheet.append_row(&record(1, "Ana", DAY)).unwrap();
            assert_eq!(sheet.sheet(), "Trip");
            assert!(SheetFile::new(&path).scan_all().is_err());
        }
    }

    describe "with a store" {
        it "survives a restart" {
            SheetFile::create(&path, SheetFile::DEFAULT_SHEET).expect("Failed to create workbook");

            let mut store = ReservationStore::new(20, Box::new(SheetFile::new(&path))).unwrap();
            store.reserve(6, "Ana", "111", DAY);
            drop(store);

            let mut store = ReservationStore::new(20, Box::new(SheetFile::new(&path))).unwrap();
            store.load(DAY);
            assert_eq!(store.is_occupied(6), Some(true));
            assert_eq!(store.reserve(6, "Bob", "222", DAY), Outcome::AlreadyReserved { seat: 6 });
        }

        it "keeps reservations in memory only when the file is missing" {
            let mut store = ReservationStore::new(4, Box::new(SheetFile::new(&path))).unwrap();

            assert_eq!(store.reserve(1, "Ana", "111", DAY), Outcome::Reserved { seat: 1 });
            assert_eq!(store.reserve(1, "Bob", "222", DAY), Outcome::AlreadyReserved { seat: 1 });

            store.load(DAY);
            assert_eq!(store.is_occupied(1), Some(false));
            assert!(!path.exists());
        }
    }
}
