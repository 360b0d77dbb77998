//! Common regex patterns for case-document field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "Label: value" or "Label - value" on a single trimmed line
    pub static ref LABEL_VALUE: Regex = Regex::new(
        r"^([A-Z][^:\n]{2,39}?)[ \t]*(?::|[ \t]-)[ \t]*(\S.*)$"
    ).unwrap();

    // A label alone on its line, optionally ending in ':' or '-'
    pub static ref BARE_LABEL: Regex = Regex::new(
        r"^([A-Z][^:\n]{2,39}?)[ \t]*[:\-]?$"
    ).unwrap();

    // Column separator on tabular payroll lines
    pub static ref COLUMN_GAP: Regex = Regex::new(
        r"\t|\s{2,}"
    ).unwrap();

    // Date of birth with a month-name date
    pub static ref DATE_OF_BIRTH: Regex = Regex::new(
        r"(?i)\b(?:DOB|D\.O\.B|born(?:[ \t]+on)?)\.?[ \t]*:?[ \t]*((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[ \t]+\d{1,2}(?:st|nd|rd|th)?,?[ \t]+\d{4}|\d{1,2}(?:st|nd|rd|th)?[ \t]+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?[ \t]+\d{4})"
    ).unwrap();

    // Month-name dates in either "March 3, 1985" or "3 March 1985" order
    pub static ref MONTH_DAY_YEAR: Regex = Regex::new(
        r"(?i)^([a-z]+)\.?[ \t]+(\d{1,2})(?:st|nd|rd|th)?,?[ \t]+(\d{4})$"
    ).unwrap();

    pub static ref DAY_MONTH_YEAR: Regex = Regex::new(
        r"(?i)^(\d{1,2})(?:st|nd|rd|th)?[ \t]+([a-z]+)\.?,?[ \t]+(\d{4})$"
    ).unwrap();

    // Date of loss/incident with a numeric date
    pub static ref DATE_OF_LOSS: Regex = Regex::new(
        r"(?i)Date[ \t]+of[ \t]+(?:Incident|Loss)[ \t]*:[ \t]*([\d/.\-]+)"
    ).unwrap();

    pub static ref NUMERIC_DATE: Regex = Regex::new(
        r"^(\d{1,4})[/.\-](\d{1,2})[/.\-](\d{1,4})$"
    ).unwrap();

    // US phone: (555) 123-4567, 555-123-4567, 555.123.4567
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\(\d{3}\)|\b\d{3})[-. ]?\d{3}[-. ]?\d{4}\b"
    ).unwrap();

    // Email pattern
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // Loose US street address: house number, street words, street-type suffix
    pub static ref STREET_ADDRESS: Regex = Regex::new(
        r"\b\d{1,6}[ \t]+(?:[A-Z0-9][A-Za-z0-9.']*[ \t]+){1,4}?(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Way|Place|Pl|Terrace|Ter|Circle|Cir|Parkway|Pkwy|Highway|Hwy)\b\.?"
    ).unwrap();

    // Paystub total hours
    pub static ref HOURS_WORKED: Regex = Regex::new(
        r"(?i)Total[ \t]+Hours[ \t]+Worked[^\n]*?(\d+\.\d+)"
    ).unwrap();
}
