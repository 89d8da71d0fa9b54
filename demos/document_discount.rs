use rust_decimal_macros::dec;
use taxsum::core::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let quote = DocumentBuilder::new(DocumentKind::Quote)
        .amount_discount(dec!(30))
        .add_line(
            LineItemBuilder::new(dec!(240), dec!(1))
                .discount(dec!(40))
                .tax1("VAT", dec!(20))
                .build(),
        )
        .add_line(
            LineItemBuilder::new(dec!(105), dec!(1))
                .tax1("GST", dec!(5))
                .build(),
        )
        .build()
        .expect("quote should be valid");

    let calc = InclusiveTaxCalculator::new(&quote);
    let first = calc.process().expect("amounts are in range");
    let second = calc
        .calculate_taxes_with_amount_discount(&first)
        .expect("amounts are in range");

    println!("Subtotal:            {}", first.sub_total);
    println!("Tax before discount: {}", first.total_taxes.round_dp(2));
    println!("Tax after discount:  {}", second.total_taxes.round_dp(2));
    for (i, line) in second.line_items.iter().enumerate() {
        let tax = line.tax_amount.unwrap_or_default();
        println!("  line {}: total {} tax {}", i + 1, line.line_total, tax.round_dp(2));
    }
    let groups = second
        .tax_collection
        .totals_by_key()
        .expect("tax totals are in range");
    for group in groups {
        println!("  {:<8} {}", group.name, group.total.round_dp(2));
    }
}
