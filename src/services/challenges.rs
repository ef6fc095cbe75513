use chrono::{Datelike, NaiveDate};

use crate::models::Challenge;

pub static CATALOG: [Challenge; 3] = [
    Challenge {
        id: 1,
        title: "Go to the University of Mittweida",
        description: "Visit the main campus and take a photo",
        fun_fact: "The University of Mittweida was founded in 1867 and is one of the oldest technical universities in Germany!",
        date: "2025-01-07",
    },
    Challenge {
        id: 2,
        title: "Find the Historic Town Square",
        description: "Explore Mittweida's charming town center",
        fun_fact: "Mittweida's town square features beautiful medieval architecture from the 13th century!",
        date: "2025-01-08",
    },
    Challenge {
        id: 3,
        title: "Visit the Local Museum",
        description: "Learn about the rich history of the region",
        fun_fact: "The museum houses artifacts dating back over 800 years!",
        date: "2025-01-09",
    },
];

pub struct ChallengeService;

impl ChallengeService {
    /// The challenge scheduled for `today`, or else the catalog entry at
    /// `day-of-month mod catalog size`.
    pub fn daily_challenge(today: NaiveDate) -> &'static Challenge {
        let iso = today.format("%Y-%m-%d").to_string();

        CATALOG
            .iter()
            .find(|challenge| challenge.date == iso)
            .unwrap_or(&CATALOG[today.day() as usize % CATALOG.len()])
    }
}
