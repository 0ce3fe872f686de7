use anyhow::Result;
use price_reconcile::{
    CliConfig, LocalStorage, ReconcileEngine, ReconcileError, ReconcilePipeline, Settings,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::{FileOptions, ZipWriter};

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

use Cell::{Number, Text};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Products" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// 產生最小的 xlsx：表頭在第 1 列，商品從 A29 開始
fn write_inventory(path: &Path, rows: &[[Cell; 10]]) -> Result<()> {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>Revel product export</t></is></c></row>
"#,
    );

    for (offset, row) in rows.iter().enumerate() {
        let row_number = 29 + offset;
        sheet.push_str(&format!(r#"<row r="{}">"#, row_number));
        for (column, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", (b'A' + column as u8) as char, row_number);
            match cell {
                Text("") => {}
                Text(text) => sheet.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    reference, text
                )),
                Number(value) => {
                    sheet.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value))
                }
            }
        }
        sheet.push_str("</row>\n");
    }
    sheet.push_str("</sheetData></worksheet>");

    let mut zip = ZipWriter::new(std::fs::File::create(path)?);
    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ] {
        zip.start_file::<_, ()>(name, FileOptions::default())?;
        zip.write_all(content.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

fn product<'a>(sku: &'a str, barcode: &'a str, price: f64, cost: f64) -> [Cell<'a>; 10] {
    [
        Text("Hardware"),
        Text("Hand Tools"),
        Text("Hammers"),
        Text("Claw hammer"),
        Text("16 oz"),
        Number(price),
        Number(cost),
        Text(sku),
        Text(barcode),
        Text("Yes"),
    ]
}

fn price_change_line(member: &str, sku: &str, product_code: &str, retail: &str) -> String {
    let mut line = vec![' '; 200];
    for (start, text) in [
        (1, "PC1"),
        (4, member),
        (10, sku),
        (16, product_code),
        (30, "00012345"),
        (38, "EA"),
        (86, "00001"),
        (91, "00012345"),
        (137, retail),
    ] {
        for (offset, ch) in text.chars().enumerate() {
            line[start - 1 + offset] = ch;
        }
    }
    line.into_iter().collect()
}

struct Fixture {
    dir: TempDir,
    outdir: PathBuf,
}

impl Fixture {
    fn new(changes: &[String], inventory: &[[Cell; 10]]) -> Result<Self> {
        let dir = TempDir::new()?;
        let outdir = dir.path().join("out");
        std::fs::create_dir(&outdir)?;

        let mut content = vec!["H01PRCCHGS06969 2024031512304501.1".to_string()];
        content.extend(changes.iter().cloned());
        content.push("T01PRCCHGS06969 202403151230450000009".to_string());
        std::fs::write(dir.path().join("pricechange.txt"), content.join("\n"))?;

        write_inventory(&dir.path().join("inventory.xlsx"), inventory)?;

        Ok(Self { dir, outdir })
    }

    fn config(&self) -> CliConfig {
        CliConfig {
            pricechange: self.dir.path().join("pricechange.txt"),
            inventory: self.dir.path().join("inventory.xlsx"),
            outdir: self.outdir.clone(),
            config: None,
            verbose: false,
            log_json: false,
        }
    }

    fn engine(&self) -> ReconcileEngine<ReconcilePipeline<LocalStorage, CliConfig>> {
        let storage = LocalStorage::new(self.outdir.clone());
        let pipeline = ReconcilePipeline::new(storage, self.config(), Settings::default());
        ReconcileEngine::new(pipeline)
    }

    fn report(&self, name: &str) -> Result<serde_json::Value> {
        let data = std::fs::read(self.outdir.join(name))?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[tokio::test]
async fn test_end_to_end_reconciliation() -> Result<()> {
    let fixture = Fixture::new(
        &[
            price_change_line("06969 ", "SKU1  ", "00012345678905", "0002499"),
            price_change_line("01234 ", "SKU2  ", "00000000000222", "0000100"),
            price_change_line("06969 ", "SKU3  ", "00000000009999", "0000100"),
        ],
        &[
            product("SKU1", "012345678905", 19.99, 11.5),
            product("SKU2", "222", 5.0, 2.0),
        ],
    )?;
    std::fs::write(fixture.outdir.join("no_suggested_retail.json"), "{}")?;

    let outcome = fixture.engine().run().await?;

    assert!(outcome.is_success());
    assert_eq!(outcome.matched, 1);
    assert!(!fixture.outdir.join("no_suggested_retail.json").exists());

    let minimal = fixture.report("minimal_report.json")?;
    let entry = &minimal["12345678905"];
    assert_eq!(entry["sku"], "SKU1");
    assert_eq!(entry["sku_matches"], true);
    assert!(entry.get("supplier_sku").is_none());
    assert_eq!(entry["revel_price"]["price"], 1999);
    assert_eq!(entry["revel_price"]["cost"], 1150);
    assert_eq!(entry["change_details"]["suggested_retail"], "2499");
    assert_eq!(entry["change_details"]["item_price_change"], "12345");
    assert_eq!(minimal.as_object().unwrap().len(), 1);

    let verbose = fixture.report("verbose_report.json")?;
    assert_eq!(
        verbose["12345678905"]["change_details"]["3"]["cost_3"],
        "00012345"
    );
    Ok(())
}

#[tokio::test]
async fn test_numeric_barcode_cells_match() -> Result<()> {
    let mut row = product("SKU7", "", 3.25, 1.0);
    row[8] = Number(12345678.0);
    let fixture = Fixture::new(
        &[price_change_line("06969 ", "SKU7  ", "00000012345678", "0000399")],
        &[row],
    )?;

    let outcome = fixture.engine().run().await?;

    assert_eq!(outcome.matched, 1);
    let minimal = fixture.report("minimal_report.json")?;
    assert_eq!(minimal["12345678"]["sku_matches"], true);
    Ok(())
}

#[tokio::test]
async fn test_missing_suggested_retail_fails_run() -> Result<()> {
    let fixture = Fixture::new(
        &[
            price_change_line("06969 ", "SKU1  ", "00012345678905", "0002499"),
            price_change_line("06969 ", "SKU9  ", "00000000000222", "       "),
        ],
        &[
            product("SKU1", "012345678905", 19.99, 11.5),
            product("SKU2", "0222", 5.0, 2.0),
        ],
    )?;

    let outcome = fixture.engine().run().await?;

    assert!(!outcome.is_success());
    assert_eq!(outcome.missing_suggested_retail, vec!["222"]);

    let diagnostic = fixture.report("no_suggested_retail.json")?;
    let upcs: Vec<_> = diagnostic.as_object().unwrap().keys().cloned().collect();
    assert_eq!(upcs, vec!["222"]);
    assert_eq!(diagnostic["222"]["sku_matches"], false);
    assert_eq!(diagnostic["222"]["supplier_sku"], "SKU9");

    let minimal = fixture.report("minimal_report.json")?;
    assert_eq!(minimal["222"]["supplier_sku"], "SKU9");
    assert_eq!(minimal.as_object().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_no_matches_still_writes_empty_reports() -> Result<()> {
    let fixture = Fixture::new(
        &[price_change_line("06969 ", "SKU3  ", "00000000009999", "0000100")],
        &[product("SKU1", "012345678905", 19.99, 11.5)],
    )?;

    let outcome = fixture.engine().run().await?;

    assert!(outcome.is_success());
    assert_eq!(outcome.matched, 0);
    assert_eq!(fixture.report("verbose_report.json")?, serde_json::json!({}));
    assert_eq!(fixture.report("minimal_report.json")?, serde_json::json!({}));
    Ok(())
}

#[tokio::test]
async fn test_unreadable_inventory_price_aborts() -> Result<()> {
    let mut bad = product("SKU2", "222", 0.0, 1.0);
    bad[5] = Text("call for price");
    let fixture = Fixture::new(
        &[price_change_line("06969 ", "SKU1  ", "00012345678905", "0002499")],
        &[product("SKU1", "012345678905", 19.99, 11.5), bad],
    )?;

    let result = fixture.engine().run().await;

    match result {
        Err(ReconcileError::InvalidCell { row, column, .. }) => {
            assert_eq!(row, 30);
            assert_eq!(column, "F");
        }
        other => panic!("expected invalid cell, got {:?}", other),
    }
    assert!(!fixture.outdir.join("minimal_report.json").exists());
    Ok(())
}
