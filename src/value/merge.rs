//! Forward merge of `dt-*` values that share one property name.

use super::PropertyValue;

/// Merge split datetimes in document order.
///
/// Each datetime missing a date takes the latest preceding date, and each
/// datetime missing an offset takes the latest preceding offset. A date-only
/// value whose date is picked up by the very next datetime is folded into
/// it, so `2012-03-01` followed by `5pm` becomes one `2012-03-01T17:00:00`.
/// Values never flow backwards, and non-datetime values pass through.
pub fn merge_datetimes(values: Vec<PropertyValue>) -> Vec<PropertyValue> {
    let mut slots: Vec<Option<PropertyValue>> = Vec::with_capacity(values.len());
    let mut last_date = None;
    let mut last_offset = None;
    let mut pending_date_only: Option<usize> = None;

    for value in values {
        let PropertyValue::DateTime(mut dt) = value else {
            slots.push(Some(value));
            continue;
        };

        match dt.date {
            Some(date) => last_date = Some(date),
            None => {
                if let Some(date) = last_date {
                    dt.date = Some(date);
                    if let Some(index) = pending_date_only.take() {
                        slots[index] = None;
                    }
                }
            }
        }

        match dt.offset {
            Some(offset) => last_offset = Some(offset),
            None => dt.offset = last_offset,
        }

        pending_date_only = dt.is_date_only().then_some(slots.len());
        slots.push(Some(PropertyValue::DateTime(dt)));
    }

    slots.into_iter().flatten().collect()
}
