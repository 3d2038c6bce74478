/// Short money label for tile captions: `$950`, `$12.5K`, `$20.34M`.
///
/// The unit is picked after rounding, so `999.6` reads `$1.0K` rather than
/// `$1000`.
pub fn human_amount(v: f64) -> String {
    const UNITS: [&str; 5] = ["", "K", "M", "B", "T"];
    let sign = if v < 0.0 { "-" } else { "" };
    let mut n = v.abs();
    let mut u = 0;
    loop {
        let decimals = u.min(2);
        let shown = format!("{n:.decimals$}");
        let carries = shown.parse::<f64>().map_or(false, |r| r >= 1000.0);
        if carries && u < UNITS.len() - 1 {
            n /= 1000.0;
            u += 1;
            continue;
        }
        return format!("{sign}${shown}{}", UNITS[u]);
    }
}
