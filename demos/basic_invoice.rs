use rust_decimal_macros::dec;
use taxsum::core::*;

fn main() {
    let invoice = DocumentBuilder::new(DocumentKind::Invoice)
        .percent_discount(dec!(5))
        .add_line(
            LineItemBuilder::new(dec!(119), dec!(8))
                .product_key("consulting")
                .notes("React frontend")
                .discount(dec!(10))
                .tax1("MwSt", dec!(19))
                .build(),
        )
        .add_line(
            LineItemBuilder::new(dec!(49.90), dec!(1))
                .product_key("hosting")
                .tax1("MwSt", dec!(19))
                .build(),
        )
        .add_line(
            LineItemBuilder::new(dec!(21.40), dec!(2))
                .product_key("books")
                .tax1("MwSt", dec!(7))
                .build(),
        )
        .build()
        .expect("invoice should be valid");

    let first = InclusiveTaxCalculator::new(&invoice)
        .process()
        .expect("amounts are in range");

    println!("Lines ({}):", invoice.kind.entity());
    for line in &first.line_items {
        println!(
            "  {:<12} {} x {} = {}",
            line.product_key, line.quantity, line.cost, line.line_total
        );
    }
    println!("---");
    println!("Subtotal:  {}", first.sub_total);
    let groups = first
        .tax_collection
        .totals_by_key()
        .expect("tax totals are in range");
    for group in groups {
        println!("  {:<10} {}", group.name, group.total.round_dp(2));
    }
    println!("Tax incl.: {}", first.total_taxes.round_dp(2));
}
