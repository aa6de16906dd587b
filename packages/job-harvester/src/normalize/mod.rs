//! Pure text-to-typed transforms for the scraped fields, plus the composing
//! pass that attaches the derived columns to each record.

mod address;
mod salary;
mod taxonomy;

pub use address::split_address;
pub use salary::{parse_salary, ParsedSalary};
pub use taxonomy::{classify_title, JOB_GROUPS, OTHER_GROUP};

use crate::types::JobRecord;

/// Attach `min_salary`/`max_salary`/`currency_unit`, `city`/`district` and
/// `job_group` to every record. Raw source fields are left untouched.
pub fn enrich(records: &mut [JobRecord]) {
    for record in records.iter_mut() {
        let salary = parse_salary(record.raw_salary.as_deref());
        record.min_salary = salary.min;
        record.max_salary = salary.max;
        record.currency_unit = salary.unit;

        let (city, district) = split_address(record.raw_address.as_deref());
        record.city = city;
        record.district = district;

        record.job_group = Some(classify_title(&record.title).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CurrencyUnit, DetailInfo, JobRecord, ListingSummary};

    fn record(title: &str, salary: Option<&str>, address: Option<&str>) -> JobRecord {
        JobRecord::from_parts(
            ListingSummary {
                link: format!("https://example.vn/viec-lam/{}", title.len()),
                title: title.to_string(),
                company: Some("Công ty".to_string()),
                raw_salary: salary.map(String::from),
                raw_address: address.map(String::from),
                created_date_text: None,
            },
            DetailInfo::default(),
            None,
        )
    }

    #[test]
    fn enrich_attaches_all_derived_fields() {
        let mut records = vec![
            record("Chuyên Viên Business Analyst", Some("10 - 20 triệu"), Some("Hà Nội: Cầu Giấy")),
            record("Thực tập sinh .NET", Some("Thoả thuận"), Some("Hồ Chí Minh")),
            record("Lập trình viên Java", Some("Trên 2000 USD"), Some("Hà Nội: Thanh Xuân: Hải Dương")),
            record("Kế toán tổng hợp", Some("Tới 15 triệu"), None),
        ];
        enrich(&mut records);

        assert_eq!(records[0].min_salary, Some(10_000_000.0));
        assert_eq!(records[0].max_salary, Some(20_000_000.0));
        assert_eq!(records[0].currency_unit, Some(CurrencyUnit::Vnd));
        assert_eq!(records[0].city.as_deref(), Some("Hà Nội"));
        assert_eq!(records[0].district.as_deref(), Some("Cầu Giấy"));
        assert_eq!(records[0].job_group.as_deref(), Some("Business Analyst"));

        assert_eq!(records[1].min_salary, None);
        assert_eq!(records[1].currency_unit, None);
        assert_eq!(records[1].district, None);
        assert_eq!(records[1].job_group.as_deref(), Some("Intern"));

        assert_eq!(records[2].min_salary, Some(2000.0));
        assert_eq!(records[2].max_salary, None);
        assert_eq!(records[2].currency_unit, Some(CurrencyUnit::Usd));
        assert_eq!(records[2].district.as_deref(), Some("Thanh Xuân"));
        assert_eq!(records[2].job_group.as_deref(), Some("Java Developer"));

        assert_eq!(records[3].min_salary, None);
        assert_eq!(records[3].max_salary, Some(15_000_000.0));
        assert_eq!(records[3].city, None);
        assert_eq!(records[3].job_group.as_deref(), Some("Other"));

        // Raw fields untouched
        assert_eq!(records[0].raw_salary.as_deref(), Some("10 - 20 triệu"));
        assert_eq!(records[2].raw_address.as_deref(), Some("Hà Nội: Thanh Xuân: Hải Dương"));
    }
}
