//! Demo data: wipe the store and fill one user's last week with random activity.

use rand::Rng;

use crate::db::{wipe_all, Storage, StorageError};
use crate::models::activity::{ActivityKind, NewActivity};
use crate::services::activities::insert_activity;
use crate::services::users::create_user;
use crate::time_utils::{today_ms, MS_IN_DAY};

const SEED_DAYS: i64 = 8;

/// (activity, min, max, round to cents; otherwise whole units)
const SEED_ACTIVITIES: &[(&str, f64, f64, bool)] = &[
    ("walk", 0.1, 1.0, true),
    ("run", 1.0, 3.0, true),
    ("swim", 30.0, 100.0, false),
    ("bike", 5.0, 10.0, true),
    ("yoga", 30.0, 120.0, false),
    ("soccer", 120.0, 180.0, false),
    ("basketball", 60.0, 120.0, false),
];

/// Planned entries: (activity, days before today)
const SEED_PLANNED: &[(&str, i64)] = &[("yoga", 2), ("yoga", 3), ("run", 2)];

fn random_amount<R: Rng>(rng: &mut R, min: f64, max: f64, round: bool) -> f64 {
    let val = rng.gen_range(min..max);
    if round {
        (val * 100.0).round() / 100.0
    } else {
        val.floor()
    }
}

/// Activities for eight consecutive days starting a week ago, plus a few
/// planned reminders that are already due.
pub fn demo_activities(user_id: &str, today: i64) -> Vec<NewActivity> {
    let mut rng = rand::thread_rng();
    let start = today - 7 * MS_IN_DAY;

    let mut activities = Vec::new();
    for (activity_type, min, max, round) in SEED_ACTIVITIES {
        for day in 0..SEED_DAYS {
            activities.push(NewActivity {
                user_id: user_id.to_string(),
                activity_type: activity_type.to_string(),
                date: start + day * MS_IN_DAY,
                kind: ActivityKind::Completed(random_amount(&mut rng, *min, *max, *round)),
            });
        }
    }

    for (activity_type, days_ago) in SEED_PLANNED {
        activities.push(NewActivity {
            user_id: user_id.to_string(),
            activity_type: activity_type.to_string(),
            date: today - days_ago * MS_IN_DAY,
            kind: ActivityKind::Planned(-1.0),
        });
    }

    activities
}

/// Wipe everything, then seed `user_id`. Returns the number of activities written.
pub async fn seed_demo_data(
    db: &Storage,
    user_id: &str,
    name: &str,
) -> Result<usize, StorageError> {
    wipe_all(db).await?;
    create_user(db, user_id, name).await;

    let activities = demo_activities(user_id, today_ms());
    for activity in &activities {
        insert_activity(db, activity).await;
    }

    tracing::info!(user_id = %user_id, count = activities.len(), "Seeded demo data");
    Ok(activities.len())
}
