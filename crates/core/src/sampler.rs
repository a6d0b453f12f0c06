//! Random seed data for demo and local environments.
//!
//! Nothing in the request path depends on this module; it only exists so a
//! fresh database has assets to list and users to favorite them.

use rand::Rng;

use crate::asset::{Asset, Audience};
use crate::types::{self, UserId};
use crate::user::User;

const GENDERS: &[&str] = &["Male", "Female", "Other"];

const COUNTRIES: &[&str] = &[
    "Germany", "Italy", "Brazil", "Portugal", "Slovenia", "Sweden", "Romania", "Greece",
];

const INSIGHT_SUBJECTS: &[&str] = &[
    "Gen Z shoppers",
    "Urban commuters",
    "First-time parents",
    "Remote workers",
    "Gamers over 35",
];

const INSIGHT_FACTS: &[&str] = &[
    "spend more time on short-form video than on search",
    "prefer to research products on social media",
    "are twice as likely to abandon a cart on mobile",
    "report higher trust in peer reviews than in ads",
    "discover new brands mostly through podcasts",
];

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Chiara", "Dimitris", "Elsa", "Filipe", "Greta", "Ioana", "Luka", "Marta",
];

const LAST_NAMES: &[&str] = &[
    "Silva", "Rossi", "Novak", "Papadopoulos", "Lindqvist", "Popescu", "Schmidt", "Costa",
];

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Generate `n` assets with a random mix of variants.
pub fn sample_assets(n: usize) -> Vec<Asset> {
    let mut rng = rand::rng();
    (0..n)
        .map(|i| match rng.random_range(0..3) {
            0 => {
                let len = rng.random_range(1..=5);
                let data = (0..len).map(|_| rng.random::<f64>() * 100.0).collect();
                Asset::chart(format!("Chart {i}"), "X Axis", "Y Axis", data)
            }
            1 => Asset::insight(format!(
                "{} {}.",
                pick(&mut rng, INSIGHT_SUBJECTS),
                pick(&mut rng, INSIGHT_FACTS)
            )),
            _ => Asset::audience(Audience {
                gender: pick(&mut rng, GENDERS).to_string(),
                birth_country: pick(&mut rng, COUNTRIES).to_string(),
                age_min: rng.random_range(0..60),
                age_max: rng.random_range(60..80),
                social_media_hours: rng.random_range(0..9000),
                last_month_purchases: rng.random_range(0..100),
            }),
        })
        .collect()
}

/// Generate `n` users with random names and fresh ids.
pub fn sample_users(n: usize) -> Vec<User> {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| {
            let now = types::now();
            let id: UserId = types::new_id();
            User {
                id,
                name: format!(
                    "{} {}",
                    pick(&mut rng, FIRST_NAMES),
                    pick(&mut rng, LAST_NAMES)
                ),
                created_at: now,
                updated_at: now,
            }
        })
        .collect()
}
