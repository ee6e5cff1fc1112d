// src/bulletin/types.rs

/// CSV header, in record field order.
pub const COLUMN_NAMES: [&str; 7] = [
    "Visa Bulletin Release Month",
    "EB1 Final Action Date",
    "EB2 Final Action Date",
    "EB3 Final Action Date",
    "EB1 Filing Date",
    "EB2 Filing Date",
    "EB3 Filing Date",
];

/// One INDIA row of a monthly bulletin.
///
/// Date fields hold a normalized `DDMonYY` token, the release month when the
/// bulletin marked the category current, or the raw cell text otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletinRecord {
    pub release_month: String,
    pub eb1_final_action: String,
    pub eb2_final_action: String,
    pub eb3_final_action: String,
    pub eb1_filing: String,
    pub eb2_filing: String,
    pub eb3_filing: String,
}

impl BulletinRecord {
    /// Field values in `COLUMN_NAMES` order.
    pub fn values(&self) -> [&str; 7] {
        [
            &self.release_month,
            &self.eb1_final_action,
            &self.eb2_final_action,
            &self.eb3_final_action,
            &self.eb1_filing,
            &self.eb2_filing,
            &self.eb3_filing,
        ]
    }

    pub fn from_values(values: [String; 7]) -> Self {
        let [
            release_month,
            eb1_final_action,
            eb2_final_action,
            eb3_final_action,
            eb1_filing,
            eb2_filing,
            eb3_filing,
        ] = values;
        Self {
            release_month,
            eb1_final_action,
            eb2_final_action,
            eb3_final_action,
            eb1_filing,
            eb2_filing,
            eb3_filing,
        }
    }

    pub fn final_action(&self) -> [&str; 3] {
        [
            &self.eb1_final_action,
            &self.eb2_final_action,
            &self.eb3_final_action,
        ]
    }
}
