//! Common test utilities for gateway-polars tests

use gateway_core::{AgeAtFirstUse, EverUsed, Respondent, Survey};
use AgeAtFirstUse::{Never, Years};
use EverUsed::{No, Yes};

/// Ten respondents: six marijuana users (two of them also used a hard drug,
/// one used two) and four non-users (one used cocaine)
pub fn sample_survey() -> Survey {
    vec![
        Respondent::new([Yes, Yes, No, No], [Years(15), Years(19), Never, Never]),
        Respondent::new([Yes, Yes, No, Yes], [Years(14), Years(18), Never, Years(22)]),
        Respondent::new([Yes, No, No, No], [Years(16), Never, Never, Never]),
        Respondent::new([Yes, No, No, No], [Years(17), Never, Never, Never]),
        Respondent::new([Yes, No, No, No], [Years(18), Never, Never, Never]),
        Respondent::new([Yes, No, No, No], [Years(13), Never, Never, Never]),
        Respondent::new([No, Yes, No, No], [Never, Years(25), Never, Never]),
        Respondent::new([No, No, No, No], [Never; 4]),
        Respondent::new([No, No, No, No], [Never; 4]),
        Respondent::new([No, No, No, No], [Never; 4]),
    ]
    .into_iter()
    .collect()
}
