use chrono::{Duration, NaiveDateTime};

use crate::models::{Frequency, Reminder, ScheduledOccurrence};

/// Computes the upcoming occurrences for a user's reminders
///
/// Filters to the target user and to active reminders internally, so callers
/// may pass an unfiltered list. Every returned occurrence falls within
/// `[now, now + window_days]`; negative windows are treated as zero. Results
/// are sorted ascending by occurrence timestamp, ties broken by reminder id.
///
/// This never fails: reminders without a time-of-day fire immediately at
/// `now`, and unrecognized frequency tags behave as daily.
pub fn upcoming_occurrences(
    reminders: &[Reminder],
    user_id: i64,
    now: NaiveDateTime,
    window_days: i64,
) -> Vec<ScheduledOccurrence> {
    let window_end = now + Duration::days(window_days.max(0));

    let mut upcoming: Vec<ScheduledOccurrence> = reminders
        .iter()
        .filter(|r| r.user_id == user_id && r.is_active)
        .filter_map(|r| {
            let next = next_occurrence(r, now);
            (next <= window_end).then(|| ScheduledOccurrence {
                id: r.id,
                user_id: r.user_id,
                product_id: r.product_id,
                title: r.title.clone(),
                description: r.description.clone(),
                reminder_type: r.reminder_type.clone(),
                frequency: r.frequency.clone(),
                next_occurrence: next,
            })
        })
        .collect();

    upcoming.sort_by(|a, b| {
        a.next_occurrence
            .cmp(&b.next_occurrence)
            .then(a.id.cmp(&b.id))
    });

    upcoming
}

/// Next firing of a single reminder relative to `now`
fn next_occurrence(reminder: &Reminder, now: NaiveDateTime) -> NaiveDateTime {
    let time = match reminder.reminder_time {
        Some(t) => t,
        // Legacy rows without a time-of-day fire immediately.
        None => return now,
    };

    // Today's slot, rolled to tomorrow if it already passed.
    let today = now.date().and_time(time);
    let mut candidate = if today >= now {
        today
    } else {
        today + Duration::days(1)
    };

    match Frequency::parse(reminder.frequency.as_deref()) {
        Frequency::Weekly => {
            // The rollover above leaves candidate inside the next 24h, so in
            // practice this always pushes weekly reminders a full week out.
            if candidate < now + Duration::days(1) {
                candidate += Duration::days(7);
            }
        }
        Frequency::Monthly => {
            // Fixed 30-day month, and only when the slot already passed.
            if candidate < now {
                candidate += Duration::days(30);
            }
        }
        Frequency::Daily => {}
    }

    candidate
}
