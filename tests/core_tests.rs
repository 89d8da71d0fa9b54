use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taxsum::core::*;

fn vat_line(cost: Decimal, quantity: Decimal) -> LineItem {
    LineItemBuilder::new(cost, quantity)
        .tax1("VAT", dec!(10))
        .build()
}

fn invoice(lines: Vec<LineItem>) -> DocumentBuilder {
    let mut builder = DocumentBuilder::new(DocumentKind::Invoice);
    for line in lines {
        builder = builder.add_line(line);
    }
    builder
}

// --- First pass ---

#[test]
fn empty_document() {
    let document = Document::new(DocumentKind::Invoice);
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();

    assert!(first.line_items.is_empty());
    assert_eq!(first.sub_total, Decimal::ZERO);
    assert_eq!(first.gross_sub_total, Decimal::ZERO);
    assert_eq!(first.total_taxes, Decimal::ZERO);
    assert!(first.tax_collection.is_empty());
}

#[test]
fn single_vat_line() {
    let document = invoice(vec![vat_line(dec!(100), dec!(1))]).build().unwrap();
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();

    let line = &first.line_items[0];
    assert_eq!(line.line_total, dec!(100));
    assert_eq!(line.gross_line_total, dec!(100));
    assert!(!line.is_amount_discount);
    assert_eq!(line.tax_amount, None);

    assert_eq!(first.sub_total, dec!(100));
    assert_eq!(first.total_taxes.round_dp(2), dec!(9.09));

    let groups = first.tax_collection.as_slice();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].key, "VAT10");
    assert_eq!(groups[0].name, "VAT 10 %");
    assert_eq!(groups[0].total, first.total_taxes);
}

#[test]
fn amount_line_discount() {
    let document = invoice(vec![
        LineItemBuilder::new(dec!(100), dec!(1)).discount(dec!(20)).build(),
    ])
    .amount_discount(Decimal::ZERO)
    .build()
    .unwrap();

    let first = InclusiveTaxCalculator::new(&document).process().unwrap();
    assert_eq!(first.line_items[0].line_total, dec!(80));
    assert!(first.line_items[0].is_amount_discount);
}

#[test]
fn percent_line_discount() {
    let document = invoice(vec![
        LineItemBuilder::new(dec!(100), dec!(1)).discount(dec!(10)).build(),
    ])
    .build()
    .unwrap();

    let first = InclusiveTaxCalculator::new(&document).process().unwrap();
    assert_eq!(first.line_items[0].line_total, dec!(90));
}

#[test]
fn line_total_rounded_after_discount() {
    // 3 * 3.33 = 9.99, minus 12.5% = 8.74125 -> 8.74
    let document = invoice(vec![
        LineItemBuilder::new(dec!(3.33), dec!(3)).discount(dec!(12.5)).build(),
    ])
    .build()
    .unwrap();

    let first = InclusiveTaxCalculator::new(&document).process().unwrap();
    assert_eq!(first.line_items[0].line_total, dec!(8.74));
}

#[test]
fn unrounded_product_without_discount_is_still_rounded() {
    let document = invoice(vec![LineItemBuilder::new(dec!(0.333), dec!(1)).build()])
        .build()
        .unwrap();
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();
    assert_eq!(first.line_items[0].line_total, dec!(0.33));
}

#[test]
fn percent_document_discount_reduces_tax_basis_not_line_total() {
    // Basis: 110 - 10% = 99, tax = 99 - 99 / 1.1 = 9
    let document = invoice(vec![vat_line(dec!(110), dec!(1))])
        .percent_discount(dec!(10))
        .build()
        .unwrap();

    let first = InclusiveTaxCalculator::new(&document).process().unwrap();
    assert_eq!(first.line_items[0].line_total, dec!(110));
    assert_eq!(first.sub_total, dec!(110));
    assert_eq!(first.total_taxes, dec!(9));
}

#[test]
fn amount_document_discount_ignored_in_first_pass() {
    let document = invoice(vec![vat_line(dec!(110), dec!(1))])
        .amount_discount(dec!(10))
        .build()
        .unwrap();

    let first = InclusiveTaxCalculator::new(&document).process().unwrap();
    assert_eq!(first.total_taxes, dec!(10));
}

#[test]
fn gross_equals_net() {
    let document = invoice(vec![vat_line(dec!(50), dec!(3)), vat_line(dec!(20), dec!(1))])
        .build()
        .unwrap();
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();

    for line in &first.line_items {
        assert_eq!(line.gross_line_total, line.line_total);
    }
    assert_eq!(first.gross_sub_total, first.sub_total);
    assert_eq!(first.sub_total, dec!(170));
}

#[test]
fn process_twice_is_identical() {
    let document = invoice(vec![vat_line(dec!(19.99), dec!(7)), vat_line(dec!(5), dec!(2))])
        .percent_discount(dec!(3))
        .build()
        .unwrap();
    let calc = InclusiveTaxCalculator::new(&document);

    let a = calc.process().unwrap();
    let b = calc.process().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.sub_total, b.sub_total);
    assert_eq!(a.total_taxes, b.total_taxes);
}

#[test]
fn input_document_untouched() {
    let document = invoice(vec![vat_line(dec!(100), dec!(2))]).build().unwrap();
    let before = document.line_items.clone();
    let _ = InclusiveTaxCalculator::new(&document).process().unwrap();
    assert_eq!(document.line_items, before);
    assert_eq!(document.line_items[0].line_total, Decimal::ZERO);
}

#[test]
fn order_preserved() {
    let lines: Vec<LineItem> = (1..=5)
        .map(|i| {
            LineItemBuilder::new(Decimal::from(i * 10), dec!(1))
                .product_key(format!("item-{i}"))
                .build()
        })
        .collect();
    let document = invoice(lines).build().unwrap();
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();

    let keys: Vec<&str> = first.line_items.iter().map(|l| l.product_key.as_str()).collect();
    assert_eq!(keys, vec!["item-1", "item-2", "item-3", "item-4", "item-5"]);
}

#[test]
fn same_tax_on_two_lines_not_merged() {
    let document = invoice(vec![vat_line(dec!(100), dec!(1)), vat_line(dec!(55), dec!(2))])
        .build()
        .unwrap();
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();

    let groups = first.tax_collection.as_slice();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, "VAT10");
    assert_eq!(groups[1].key, "VAT10");

    let reduced = first.tax_collection.totals_by_key().unwrap();
    assert_eq!(reduced.len(), 1);
    assert_eq!(reduced[0].total, first.total_taxes);
}

#[test]
fn three_tax_slots() {
    let document = invoice(vec![
        LineItemBuilder::new(dec!(120), dec!(1))
            .tax1("VAT", dec!(20))
            .tax2("City", dec!(5))
            .tax3("Eco", dec!(1.5))
            .build(),
    ])
    .build()
    .unwrap();
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();

    let expected = calc_inclusive_line_tax(dec!(20), dec!(120)).unwrap()
        + calc_inclusive_line_tax(dec!(5), dec!(120)).unwrap()
        + calc_inclusive_line_tax(dec!(1.5), dec!(120)).unwrap();
    assert_eq!(first.total_taxes, expected);

    let keys: Vec<&str> = first.tax_collection.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["VAT20", "City5", "Eco1.5"]);
    assert_eq!(first.tax_collection.total().unwrap(), expected);
}

#[test]
fn named_zero_rate_recorded_in_first_pass() {
    let document = invoice(vec![
        LineItemBuilder::new(dec!(10), dec!(1)).tax1("Exempt", dec!(0)).build(),
    ])
    .build()
    .unwrap();
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();

    assert_eq!(first.tax_collection.len(), 1);
    assert_eq!(first.tax_collection.as_slice()[0].total, Decimal::ZERO);
    assert_eq!(first.tax_collection.as_slice()[0].name, "Exempt 0 %");
}

#[test]
fn discount_beyond_cost_goes_negative() {
    let document = invoice(vec![
        LineItemBuilder::new(dec!(10), dec!(1))
            .discount(dec!(35))
            .tax1("VAT", dec!(25))
            .build(),
    ])
    .amount_discount(Decimal::ZERO)
    .build()
    .unwrap();
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();

    assert_eq!(first.line_items[0].line_total, dec!(-25));
    assert_eq!(first.total_taxes, dec!(-5));
}

#[test]
fn custom_rounding() {
    let document = invoice(vec![
        LineItemBuilder::new(dec!(0.125), dec!(1)).build(),
    ])
    .build()
    .unwrap();

    let half_up = InclusiveTaxCalculator::new(&document).process().unwrap();
    assert_eq!(half_up.sub_total, dec!(0.13));

    let config = CalculatorConfig::new().with_rounding(Rounding::HalfEven);
    let half_even = InclusiveTaxCalculator::with_config(&document, config)
        .process()
        .unwrap();
    assert_eq!(half_even.sub_total, dec!(0.12));
}

// --- Second pass ---

#[test]
fn discount_spread_by_share_of_subtotal() {
    let document = invoice(vec![vat_line(dec!(66), dec!(1)), vat_line(dec!(44), dec!(1))])
        .amount_discount(dec!(11))
        .build()
        .unwrap();
    let calc = InclusiveTaxCalculator::new(&document);
    let first = calc.process().unwrap();
    let second = calc.calculate_taxes_with_amount_discount(&first).unwrap();

    // 66 - 6.6 = 59.4 -> tax 5.4; 44 - 4.4 = 39.6 -> tax 3.6
    assert_eq!(second.line_items[0].tax_amount, Some(dec!(5.4)));
    assert_eq!(second.line_items[1].tax_amount, Some(dec!(3.6)));
    assert_eq!(second.total_taxes, dec!(9));
    assert_eq!(second.tax_collection.len(), 2);
    assert_eq!(second.tax_collection.totals_by_key().unwrap()[0].total, dec!(9));

    // line totals are not reduced by the document discount
    assert_eq!(second.line_items[0].line_total, dec!(66));
    assert_eq!(second.line_items[0].gross_line_total, dec!(66));
}

#[test]
fn pass_totals_kept_apart() {
    let document = invoice(vec![vat_line(dec!(110), dec!(1))])
        .amount_discount(dec!(11))
        .build()
        .unwrap();
    let calc = InclusiveTaxCalculator::new(&document);
    let first = calc.process().unwrap();
    let second = calc.calculate_taxes_with_amount_discount(&first).unwrap();

    assert_eq!(first.total_taxes, dec!(10));
    assert_eq!(second.total_taxes, dec!(9));
    assert_eq!(second.carried_total_taxes(&first).unwrap(), dec!(19));
}

#[test]
fn second_pass_replaces_tax_collection() {
    let document = invoice(vec![vat_line(dec!(110), dec!(1))])
        .amount_discount(dec!(11))
        .build()
        .unwrap();
    let calc = InclusiveTaxCalculator::new(&document);
    let first = calc.process().unwrap();
    let second = calc.calculate_taxes_with_amount_discount(&first).unwrap();

    assert_eq!(first.tax_collection.len(), 1);
    assert_eq!(second.tax_collection.len(), 1);
    assert_eq!(first.tax_collection.as_slice()[0].total, dec!(10));
    assert_eq!(second.tax_collection.as_slice()[0].total, dec!(9));
}

#[test]
fn non_positive_lines_skipped() {
    let document = invoice(vec![
        vat_line(dec!(100), dec!(1)),
        vat_line(dec!(0), dec!(5)),
        LineItemBuilder::new(dec!(10), dec!(1))
            .discount(dec!(30))
            .tax1("VAT", dec!(10))
            .build(),
    ])
    .amount_discount(dec!(10))
    .build()
    .unwrap();
    let calc = InclusiveTaxCalculator::new(&document);
    let first = calc.process().unwrap();
    let second = calc.calculate_taxes_with_amount_discount(&first).unwrap();

    assert_eq!(second.line_items[1], first.line_items[1]);
    assert_eq!(second.line_items[2], first.line_items[2]);
    assert_eq!(second.line_items[1].tax_amount, None);
    assert_eq!(second.line_items[2].tax_amount, None);
    assert!(second.line_items[0].tax_amount.is_some());
    assert_eq!(second.tax_collection.len(), 1);
}

#[test]
fn second_pass_keeps_order_and_length() {
    let lines: Vec<LineItem> = (1..=4)
        .map(|i| {
            LineItemBuilder::new(Decimal::from(i * 25), dec!(1))
                .tax1("VAT", dec!(10))
                .notes(format!("line {i}"))
                .build()
        })
        .collect();
    let document = invoice(lines).amount_discount(dec!(5)).build().unwrap();
    let calc = InclusiveTaxCalculator::new(&document);
    let first = calc.process().unwrap();
    let second = calc.calculate_taxes_with_amount_discount(&first).unwrap();

    assert_eq!(second.line_items.len(), 4);
    for (i, line) in second.line_items.iter().enumerate() {
        assert_eq!(line.notes, format!("line {}", i + 1));
        assert_eq!(line.line_total, first.line_items[i].line_total);
    }
}

#[test]
fn zero_subtotal_yields_zero_basis() {
    // Positive line offset by a negative one: subtotal 0, basis 0.
    let document = invoice(vec![
        vat_line(dec!(50), dec!(1)),
        LineItemBuilder::new(dec!(0), dec!(1)).discount(dec!(50)).build(),
    ])
    .amount_discount(dec!(5))
    .build()
    .unwrap();
    let calc = InclusiveTaxCalculator::new(&document);
    let first = calc.process().unwrap();
    assert_eq!(first.sub_total, Decimal::ZERO);

    let second = calc.calculate_taxes_with_amount_discount(&first).unwrap();
    assert_eq!(second.line_items[0].tax_amount, Some(Decimal::ZERO));
    assert_eq!(second.total_taxes, Decimal::ZERO);
    assert!(second.tax_collection.is_empty());
}

// --- Summary ---

#[test]
fn summarize_runs_second_pass_for_amount_discount() {
    let document = invoice(vec![vat_line(dec!(110), dec!(1))])
        .amount_discount(dec!(11))
        .build()
        .unwrap();
    let summary = InclusiveTaxCalculator::new(&document).summarize().unwrap();

    assert!(summary.second.is_some());
    assert_eq!(summary.total_taxes(), dec!(9));
    assert_eq!(summary.sub_total(), dec!(110));
    assert_eq!(summary.line_items()[0].tax_amount, Some(dec!(9)));
    assert_eq!(summary.tax_collection().len(), 1);
}

#[test]
fn summarize_single_pass_for_percent_discount() {
    let document = invoice(vec![vat_line(dec!(110), dec!(1))])
        .percent_discount(dec!(10))
        .build()
        .unwrap();
    let summary = InclusiveTaxCalculator::new(&document).summarize().unwrap();

    assert!(summary.second.is_none());
    assert_eq!(summary.total_taxes(), dec!(9));
    assert_eq!(summary.line_items()[0].tax_amount, None);
}

#[test]
fn every_document_kind_sums_alike() {
    let kinds = [
        DocumentKind::Invoice,
        DocumentKind::Credit,
        DocumentKind::Quote,
        DocumentKind::PurchaseOrder,
        DocumentKind::RecurringInvoice,
    ];
    for kind in kinds {
        let document = DocumentBuilder::new(kind)
            .add_line(vat_line(dec!(100), dec!(1)))
            .build()
            .unwrap();
        let first = InclusiveTaxCalculator::new(&document).process().unwrap();
        assert_eq!(first.total_taxes.round_dp(2), dec!(9.09), "{}", kind.entity());
    }
}

#[test]
fn labels_snapshot() {
    let document = invoice(vec![
        LineItemBuilder::new(dec!(100), dec!(1))
            .tax1("VAT", dec!(10.00))
            .tax2("GST", dec!(7.5))
            .build(),
        LineItemBuilder::new(dec!(100), dec!(1))
            .tax1("Tax Rate", dec!(5))
            .build(),
    ])
    .build()
    .unwrap();
    let first = InclusiveTaxCalculator::new(&document).process().unwrap();

    let text = first
        .tax_collection
        .iter()
        .map(|g| format!("{} | {}", g.key, g.name))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(text, @r"
    VAT10 | VAT 10 %
    GST7.5 | GST 7.5 %
    Tax Rate5 | Tax Rate 5 %
    ");
}
