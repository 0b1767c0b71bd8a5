use chrono::Weekday;

use crate::error::MedicalError;
use crate::models::Slot;

/// Hours during which visits can be booked, per weekday. Any minute inside
/// a listed hour is bookable.
pub fn allowed_hours(day: Weekday) -> &'static [u32] {
    match day {
        Weekday::Mon => &[8, 9, 10, 14, 15, 20, 21],
        Weekday::Tue => &[10, 11, 15, 16, 17],
        Weekday::Wed => &[13, 14, 15, 16, 17],
        Weekday::Thu => &[8, 9, 10, 14, 15, 16, 17],
        Weekday::Fri => &[14, 15, 16, 17],
        Weekday::Sat => &[8, 9, 10],
        Weekday::Sun => &[20, 21, 22],
    }
}

pub fn is_valid_slot(day: Weekday, hour: u32, minute: u32) -> bool {
    minute < 60 && allowed_hours(day).contains(&hour)
}

/// Returns the slot unchanged when it is bookable.
///
/// `None` (no time requested) is `NotFound`; a slot outside the weekday's
/// hours is `InvalidSlot`.
pub fn check_schedule(slot: Option<Slot>) -> Result<Slot, MedicalError> {
    let slot = slot.ok_or_else(|| MedicalError::NotFound("visit schedule".to_string()))?;

    if !is_valid_slot(slot.day, slot.hour(), slot.minute()) {
        return Err(MedicalError::InvalidSlot(format!(
            "no appointments on {}",
            slot
        )));
    }

    Ok(slot)
}
