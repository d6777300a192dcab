use crate::model::MonthlySeries;

pub const QUARTER_MONTHS: usize = 3;
pub const MIN_QOQ_MONTHS: usize = 2 * QUARTER_MONTHS;
pub const MIN_MOM_MONTHS: usize = 2;
/// Latest month scaled to a quarter, the quarterly form of the x12 run rate.
pub const QUARTER_RUN_RATE_FACTOR: f64 = 4.0;

/// Quarter-over-quarter growth as a fraction (0.15 = 15%).
///
/// Compares the three most recent months with the three before them. A
/// quarter summing to exactly zero is replaced by the latest month x4.
/// Fewer than six months, or a previous quarter still zero after
/// substitution, yield 0.0.
pub fn qoq_growth(series: &MonthlySeries) -> f64 {
    if series.len() < MIN_QOQ_MONTHS {
        return 0.0;
    }

    let recent: Vec<f64> = series.values_desc().take(MIN_QOQ_MONTHS).collect();
    let latest = recent[0];

    let last_quarter = quarter_revenue(&recent[..QUARTER_MONTHS], latest);
    let previous_quarter = quarter_revenue(&recent[QUARTER_MONTHS..], latest);

    ratio_change(last_quarter, previous_quarter)
}

/// Month-over-month growth between the two most recent months, no
/// substitution.
pub fn mom_growth(series: &MonthlySeries) -> f64 {
    if series.len() < MIN_MOM_MONTHS {
        return 0.0;
    }

    let mut recent = series.values_desc();
    match (recent.next(), recent.next()) {
        (Some(last), Some(previous)) => ratio_change(last, previous),
        _ => 0.0,
    }
}

fn quarter_revenue(months: &[f64], latest: f64) -> f64 {
    let revenue: f64 = months.iter().sum();
    if revenue == 0.0 {
        return latest * QUARTER_RUN_RATE_FACTOR;
    }
    revenue
}

fn ratio_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous
}
