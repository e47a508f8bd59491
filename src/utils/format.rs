// Formato de montos en Rupiah

/// Agrupa los miles con punto: 1500000 -> "1.500.000"
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// "Rp10.000"
pub fn format_rupiah(amount: u64) -> String {
    format!("Rp{}", group_thousands(amount))
}
