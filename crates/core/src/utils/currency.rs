use rust_decimal::Decimal;

/// Formats an amount for user-facing notification text.
///
/// Common currencies get their symbol; everything else is prefixed with the
/// ISO code.
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let amount = amount.round_dp(2);
    match currency {
        "USD" => format!("${:.2}", amount),
        "EUR" => format!("€{:.2}", amount),
        "GBP" => format!("£{:.2}", amount),
        _ => format!("{} {:.2}", currency, amount),
    }
}
