pub const MIN_RISK_FRACTION: f64 = 0.001;
pub const MAX_RISK_FRACTION: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizedTrade {
    pub risk: f64,
    pub pnl: f64,
    pub new_equity: f64,
}

pub fn clamp_risk_fraction(risk_fraction: f64) -> f64 {
    if risk_fraction.is_nan() {
        return MIN_RISK_FRACTION;
    }
    risk_fraction.clamp(MIN_RISK_FRACTION, MAX_RISK_FRACTION)
}

// equity is not floored; repeated full-risk losses can take it to zero or below
pub fn size_trade(equity: f64, risk_fraction: f64, r_multiple: f64) -> SizedTrade {
    let risk = equity * clamp_risk_fraction(risk_fraction);
    let pnl = r_multiple * risk;

    SizedTrade {
        risk,
        pnl,
        new_equity: equity + pnl,
    }
}
