/// Abbreviate large counters the way the card labels show them.
///
/// Values of at least one thousand, million or billion render with one decimal and a `K`, `M` or
/// `B` suffix; smaller values render verbatim.
pub fn abbreviate(n: u64) -> String {
    const UNITS: [(u64, char); 3] = [(1_000_000_000, 'B'), (1_000_000, 'M'), (1_000, 'K')];

    for (scale, suffix) in UNITS {
        if n >= scale {
            return format!("{:.1}{suffix}", n as f64 / scale as f64);
        }
    }
    n.to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/card/number.rs"]
mod tests;
