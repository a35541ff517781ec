//! Price display

pub const CURRENCY: &str = "FCFA";

/// Format a price the way the public pages show it, e.g. `32 000 FCFA`
/// or `450 FCFA/mois`. A zero price means the price is given on request.
pub fn format_price(price: f64, monthly: bool) -> String {
    if !price.is_finite() || price <= 0.0 {
        return "Prix sur demande".to_string();
    }

    let cents = (price * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if frac > 0 {
        grouped.push_str(&format!(",{frac:02}"));
    }

    let suffix = if monthly { "/mois" } else { "" };
    format!("{grouped} {CURRENCY}{suffix}")
}
