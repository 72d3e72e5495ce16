/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Months per calendar year
pub const MONTHS_PER_YEAR: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separator between the two ends of a stay range
pub const RANGE_SEPARATOR: char = '/';

/// Longest stay the booking form accepts unless configured otherwise
pub const DEFAULT_MAX_SPAN_MONTHS: u32 = 6;

/// Shown when a booking is submitted with required fields left empty
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all the fields";

/// Shown after the server accepts a booking without its own message
pub const BOOKING_CREATED_MESSAGE: &str = "Booking created successfully";

/// Shown when the server rejects a booking without its own message
pub const SOMETHING_WENT_WRONG_MESSAGE: &str = "Something went wrong";

/// Path of the remote create-booking call, relative to the server URL
pub const CREATE_BOOKING_PATH: &str = "/user/create-booking";
