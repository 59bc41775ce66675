use chrono::NaiveDate;
use std::fmt;

/// One assignment, rendered as a spreadsheet row:
/// `course \t week \t \t due \t \t description`.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "derive-serde", derive(Serialize, Deserialize))]
pub struct AssignmentRow {
    pub course: String,
    /// Zero-based week, `None` when the module label had no `Week <n>`.
    pub week: Option<i32>,
    pub due: Option<NaiveDate>,
    pub title: String,
    /// Absolute URL of the assignment, if the item had a link.
    pub href: Option<String>
}

impl AssignmentRow {
    /// The spreadsheet cell for the assignment.
    ///
    /// A `=HYPERLINK` formula when there is a link, otherwise the bare title.
    pub fn description(&self) -> String {
        match self.href {
            Some(ref href) => format!("=HYPERLINK(\"{}\", \"{}\")",
                                      escape_formula_str(href),
                                      escape_formula_str(&self.title)),
            None => self.title.clone()
        }
    }
}

impl fmt::Display for AssignmentRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t\t{}\t\t{}",
               self.course,
               OptWeek(self.week),
               OptDate(self.due),
               self.description())
    }
}

/// One week of the course schedule: `week \t topic`.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "derive-serde", derive(Serialize, Deserialize))]
pub struct ScheduleRow {
    pub week: Option<i32>,
    pub topic: String,
    /// Graded items of the week, when requested.
    pub assignments: Option<String>
}

impl fmt::Display for ScheduleRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", OptWeek(self.week), self.topic)?;

        if let Some(ref assignments) = self.assignments {
            write!(f, "\t{}", assignments)?;
        }

        Ok(())
    }
}

struct OptWeek(Option<i32>);

impl fmt::Display for OptWeek {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(week) => write!(f, "{}", week),
            None => Ok(())
        }
    }
}

struct OptDate(Option<NaiveDate>);

impl fmt::Display for OptDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => Ok(())
        }
    }
}

/// Spreadsheet string literals escape `"` by doubling it.
fn escape_formula_str(s: &str) -> String {
    s.replace('"', "\"\"")
}
