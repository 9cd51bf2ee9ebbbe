/// Tier earned from the number of referrals a user has brought in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReferralRank {
    Unranked,
    Green,
    Blue,
    Orange,
    Gold,
    Purple,
}

impl ReferralRank {
    pub fn from_referrals(count: i64) -> Self {
        match count {
            c if c >= 500 => ReferralRank::Purple,
            c if c >= 100 => ReferralRank::Gold,
            c if c >= 50 => ReferralRank::Orange,
            c if c >= 20 => ReferralRank::Blue,
            c if c >= 5 => ReferralRank::Green,
            _ => ReferralRank::Unranked,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReferralRank::Purple => "Purple Rank",
            ReferralRank::Gold => "Gold Rank",
            ReferralRank::Orange => "Orange Rank",
            ReferralRank::Blue => "Blue Rank",
            ReferralRank::Green => "Green Rank",
            ReferralRank::Unranked => "No Rank",
        }
    }
}
