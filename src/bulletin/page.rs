// src/bulletin/page.rs

use chrono::Month;

/// Bulletin months in fiscal-year order: October of the prior calendar year
/// through September.
pub const FISCAL_MONTHS: [Month; 12] = [
    Month::October,
    Month::November,
    Month::December,
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
];

/// One (fiscal year, month) unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BulletinPage {
    pub fiscal_year: i32,
    pub month: Month,
}

impl BulletinPage {
    pub fn new(fiscal_year: i32, month: Month) -> Self {
        Self { fiscal_year, month }
    }

    /// Calendar year the bulletin was published in. The fiscal year starts in
    /// October, so October..December belong to the previous calendar year.
    pub fn suffix(&self) -> i32 {
        suffix_for(self.fiscal_year, self.month)
    }

    /// Lower-case English month name as used in the page URL.
    pub fn month_slug(&self) -> String {
        self.month.name().to_lowercase()
    }

    /// `"01" + Mon + YY`, e.g. `01Jan25`.
    pub fn release_token(&self) -> String {
        release_token(self.month, self.suffix())
    }
}

pub fn suffix_for(fiscal_year: i32, month: Month) -> i32 {
    if month.number_from_month() >= 10 {
        fiscal_year - 1
    } else {
        fiscal_year
    }
}

pub fn release_token(month: Month, suffix: i32) -> String {
    format!("01{}{:02}", &month.name()[..3], suffix.rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_rolls_back_for_q1_of_fiscal_year() {
        for fy in 2020..=2025 {
            for month in FISCAL_MONTHS {
                let expected = match month {
                    Month::October | Month::November | Month::December => fy - 1,
                    _ => fy,
                };
                assert_eq!(suffix_for(fy, month), expected, "{fy} {:?}", month);
            }
        }
    }

    #[test]
    fn release_token_uses_two_digit_suffix() {
        let page = BulletinPage::new(2024, Month::October);
        assert_eq!(page.suffix(), 2023);
        assert_eq!(page.release_token(), "01Oct23");
        assert_eq!(page.month_slug(), "october");

        assert_eq!(BulletinPage::new(2024, Month::March).release_token(), "01Mar24");
        assert_eq!(release_token(Month::January, 2005), "01Jan05");
    }

    #[test]
    fn fiscal_months_cover_the_year_once() {
        let mut numbers: Vec<u32> = FISCAL_MONTHS.iter().map(|m| m.number_from_month()).collect();
        assert_eq!(numbers[0], 10);
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=12).collect::<Vec<_>>());
    }
}
