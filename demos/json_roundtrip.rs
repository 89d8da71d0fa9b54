use taxsum::core::*;
use taxsum::json::{document_from_json_as, summary_to_json};

const PAYLOAD: &str = r#"{
    "is_amount_discount": false,
    "discount": 10,
    "line_items": [
        { "product_key": "widget", "cost": 12.5, "quantity": 4, "discount": 0,
          "tax_name1": "VAT", "tax_rate1": 25, "tax_name2": "", "tax_rate2": 0,
          "tax_name3": "", "tax_rate3": 0 }
    ]
}"#;

fn main() {
    let document = match document_from_json_as(DocumentKind::PurchaseOrder, PAYLOAD) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let errors = validate_document(&document);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("  {e}");
        }
        return;
    }

    match InclusiveTaxCalculator::new(&document)
        .summarize()
        .and_then(|summary| summary_to_json(&summary))
    {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("{e}"),
    }
}
