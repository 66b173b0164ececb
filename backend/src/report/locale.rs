//! Indonesian labels used on the printed reports.

use chrono::{Datelike, NaiveDate};

const ROMAN: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

const NUMBER_WORDS: [&str; 11] = [
    "Nol", "Satu", "Dua", "Tiga", "Empat", "Lima", "Enam", "Tujuh", "Delapan", "Sembilan",
    "Sepuluh",
];

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const WEEKDAYS: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];

/// Subtractive Roman numeral. Zero yields an empty string.
pub fn convert_to_roman(number: u32) -> String {
    let mut rest = number;
    let mut out = String::new();
    for (value, symbol) in ROMAN {
        while rest >= value {
            out.push_str(symbol);
            rest -= value;
        }
    }
    out
}

/// Indonesian word for 0 through 10; any other number is returned as digits.
pub fn convert_to_indonesian(number: i64) -> String {
    usize::try_from(number)
        .ok()
        .and_then(|n| NUMBER_WORDS.get(n))
        .map(|word| word.to_string())
        .unwrap_or_else(|| number.to_string())
}

/// `III (Tiga)`: the label printed for a shift group.
pub fn group_label(kelompok: i64) -> String {
    let roman = u32::try_from(kelompok).map(convert_to_roman).unwrap_or_default();
    format!("{} ({})", roman, convert_to_indonesian(kelompok))
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

pub fn hari_indonesia(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

/// `11 Desember 2024`.
pub fn format_date_indonesian(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date), date.year())
}

/// Describes a shift that crosses midnight, e.g. `Rabu - Kamis, 11 - 12 Desember 2024`.
///
/// Month and year are only repeated on both sides when they differ.
pub fn date_range_to_string(start: NaiveDate, end: NaiveDate) -> String {
    let days = format!("{} - {}", hari_indonesia(start), hari_indonesia(end));
    let (start_day, end_day) = (start.format("%d"), end.format("%d"));
    let (start_month, end_month) = (month_name(start), month_name(end));
    let (start_year, end_year) = (start.year(), end.year());

    if start_year != end_year && start_month != end_month {
        format!("{days}, {start_day} {start_month} {start_year} - {end_day} {end_month} {end_year}")
    } else if start_month != end_month {
        format!("{days}, {start_day} {start_month} - {end_day} {end_month} {start_year}")
    } else {
        format!("{days}, {start_day} - {end_day} {start_month} {start_year}")
    }
}

/// `Rp 150.000`: rounded to whole rupiah with `.` as the thousands separator.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("Rp {sign}{grouped}")
}
