//! Handles extraction of content from a Canvas course "Modules" page.

use super::{load_sels, take_sel, Selectors};
use crate::config::{Config, TitleRewrite};
use crate::data_structs::{AssignmentRow, ScheduleRow};
use crate::error::*;
use crate::extract;
use scraper::{ElementRef, Html, Selector};

const COURSE_PAGE_SELECTORS_STR: &'static str = include_str!("../../selectors/course_page.toml");

struct CoursePageSelectors {
    course: Selector,
    module: Selector,
    item: Selector,
    title: Selector,
    details: Selector,
    link: Selector,
    info: Selector,
    points: Selector,
    collapsed_module: Selector
}

impl CoursePageSelectors {
    fn from_table(mut sels: Selectors) -> Result<Self> {
        Ok(CoursePageSelectors {
            course: take_sel(&mut sels, "course")?,
            module: take_sel(&mut sels, "module")?,
            item: take_sel(&mut sels, "item")?,
            title: take_sel(&mut sels, "title")?,
            details: take_sel(&mut sels, "details")?,
            link: take_sel(&mut sels, "link")?,
            info: take_sel(&mut sels, "info")?,
            points: take_sel(&mut sels, "points")?,
            collapsed_module: take_sel(&mut sels, "collapsed_module")?
        })
    }
}

/// Handles extraction of content from a Canvas course "Modules" page.
///
/// The page has to be saved from a browser first; Canvas fills the module
/// list in with JavaScript, so the HTML served to a plain HTTP client is
/// missing it.
pub struct CoursePageScraper {
    doc: Html,
    sels: CoursePageSelectors,
    base_url: String,
    title_rewrites: Vec<TitleRewrite>
}

impl CoursePageScraper {
    /// Parses `html` using the selectors, base URL and title rewrites of `config`.
    pub fn new(html: &str, config: &Config) -> Result<Self> {
        let sels = load_sels(COURSE_PAGE_SELECTORS_STR, &config.selectors)?;

        Ok(CoursePageScraper {
            doc: Html::parse_document(html),
            sels: CoursePageSelectors::from_table(sels)?,
            base_url: config.base_url.clone(),
            title_rewrites: config.title_rewrites.clone()
        })
    }

    /// Same as `new` with the default config.
    #[inline]
    pub fn parse(html: &str) -> Result<Self> {
        Self::new(html, &Config::default())
    }

    /// The course code, e.g. `"CS 101"`. Empty when the page doesn't show one.
    pub fn course_code(&self) -> String {
        extract::course_code(&text_of(self.doc.root_element(), &self.sels.course))
    }

    /// The number of modules that were collapsed when the page was saved.
    ///
    /// Canvas loads the items of a collapsed module lazily, so a page saved
    /// with collapsed modules may be missing rows.
    pub fn collapsed_modules(&self) -> usize {
        self.doc.select(&self.sels.collapsed_module).count()
    }

    /// Gets one row per assignment across every weekly module.
    ///
    /// `year` is assumed for due dates that don't name one. An item with no
    /// due date at all gets the first due date of its module, which is only
    /// a guess.
    pub fn assignments(&self, year: i32) -> Vec<AssignmentRow> {
        let course = self.course_code();
        let mut rows = vec![];

        for module in self.modules() {
            let week = module_week(module);
            let mut module_rows: Vec<AssignmentRow> = module
                .select(&self.sels.item)
                .map(|item| self.assignment(item, &course, week, year))
                .collect();

            // Items without a due date take the first one found in their module
            let fallback = module_rows.iter().filter_map(|row| row.due).next();
            for row in module_rows.iter_mut().filter(|row| row.due.is_none()) {
                row.due = fallback;
            }

            debug!("Week {:?}: {} assignment(s)", week, module_rows.len());
            rows.extend(module_rows);
        }

        rows
    }

    fn assignment(&self, item: ElementRef, course: &str, week: Option<i32>, year: i32) -> AssignmentRow {
        let title = extract::format_title(&text_of(item, &self.sels.title), &self.title_rewrites);
        let due = extract::parse_due_date(&text_of(item, &self.sels.details), year);

        let mut href = None;
        if_chain! {
            if let Some(link) = item.select(&self.sels.link).next();
            if let Some(path) = link.value().attr("href");

        then {
            href = Some(extract::resolve_href(path, &self.base_url));
        }}

        if href.is_none() {
            warn!("\"{}\" has no link", title);
        }

        AssignmentRow {
            course: course.into(),
            week,
            due,
            title,
            href
        }
    }

    /// Gets the week number and topic of every weekly module.
    pub fn schedule(&self) -> Vec<ScheduleRow> {
        self.modules()
            .map(|module| ScheduleRow {
                week: module_week(module),
                topic: extract::topic(module.value().attr("aria-label").unwrap_or("")),
                assignments: None
            })
            .collect()
    }

    /// Same as `schedule`, with each week's graded items listed in a third
    /// column.
    pub fn schedule_with_assignments(&self) -> Vec<ScheduleRow> {
        self.modules()
            .zip(self.schedule())
            .map(|(module, row)| ScheduleRow {
                assignments: Some(self.schedule_assignments(module)),
                ..row
            })
            .collect()
    }

    /// Lists the graded items of a module (those showing a points value) as
    /// `"Discussion Thread, Quiz"`. Videos are left out.
    pub fn schedule_assignments(&self, module: ElementRef) -> String {
        let mut labels = vec![];

        for info in module.select(&self.sels.info) {
            if info.select(&self.sels.points).next().is_none() {
                continue;
            }

            for title in info.select(&self.sels.title) {
                let text = title.text().collect::<String>();
                if let Some(label) = extract::schedule_item_label(&text) {
                    labels.push(label);
                }
            }
        }

        labels.join(", ")
    }

    /// The weekly module elements, in page order.
    pub fn modules<'a>(&'a self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.doc.select(&self.sels.module)
    }
}

fn module_week(module: ElementRef) -> Option<i32> {
    extract::week_number(module.value().attr("aria-label").unwrap_or(""))
}

/// Trimmed text of the first element under `base` matching `sel`, or `""`.
fn text_of(base: ElementRef, sel: &Selector) -> String {
    match base.select(sel).next() {
        Some(elem) => elem.text().collect::<String>().trim().into(),
        None => String::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::output::join_rows;
    use chrono::NaiveDate;

    const TEST_DATA_COURSE_PAGE: &'static str = include_str!("../../test_data/course_page.html");

    fn course_page() -> CoursePageScraper {
        CoursePageScraper::parse(TEST_DATA_COURSE_PAGE).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn course_code() {
        assert_eq!(course_page().course_code(), "CS 101");
    }

    #[test]
    fn missing_course_code() {
        let scraper = CoursePageScraper::parse("<html><body></body></html>").unwrap();

        assert_eq!(scraper.course_code(), "");
        assert!(scraper.assignments(2024).is_empty());
        assert!(scraper.schedule().is_empty());
    }

    #[test]
    fn only_weekly_modules() {
        assert_eq!(course_page().modules().count(), 3);
    }

    #[test]
    fn collapsed_modules() {
        assert_eq!(course_page().collapsed_modules(), 1);
    }

    #[test]
    fn assignments() {
        let rows = course_page().assignments(2024);

        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.course == "CS 101"));

        assert_eq!(rows[0], AssignmentRow {
            course: "CS 101".into(),
            week: Some(0),
            due: date(2024, 8, 26),
            title: "Syllabus Quiz".into(),
            href: Some("https://canvas.liberty.edu/courses/42/assignments/1001".into())
        });

        assert_eq!(rows[2].week, Some(2));
        assert_eq!(rows[2].due, date(2025, 9, 9));
        assert_eq!(rows[2].title, "DT: Moral Theories");
        assert_eq!(rows[2].href.as_ref().unwrap(),
                   "https://canvas.liberty.edu/courses/42/discussion_topics/77");

        assert_eq!(rows[3].due, date(2024, 9, 14));
        assert_eq!(rows[3].title, "Paper: \"Trolley\" Problems");
    }

    #[test]
    fn due_date_falls_back_within_module() {
        let rows = course_page().assignments(2024);

        assert_eq!(rows[1].title, "Watch: Welcome Video");
        assert_eq!(rows[1].due, date(2024, 8, 26));

        // Nothing to borrow from in a module without any dates
        assert_eq!(rows[4].title, "Sim Lab: Case Study");
        assert_eq!(rows[4].due, None);
    }

    #[test]
    fn item_without_link() {
        let rows = course_page().assignments(2024);

        assert_eq!(rows[4].href, None);
        assert_eq!(rows[4].to_string(), "CS 101\t3\t\t\t\tSim Lab: Case Study");
    }

    #[test]
    fn assignment_rows_text() {
        let text = join_rows(&course_page().assignments(2024));
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[3],
            "CS 101\t2\t\t2024-09-14\t\t=HYPERLINK(\"https://canvas.liberty.edu/courses/42/assignments/1002\", \"Paper: \"\"Trolley\"\" Problems\")"
        );
    }

    #[test]
    fn schedule() {
        let rows: Vec<String> = course_page().schedule().iter().map(|r| r.to_string()).collect();

        assert_eq!(rows, vec![
            "0\tCourse Orientation",
            "2\tIntro to Ethics",
            "3\tApplied Ethics"
        ]);
    }

    #[test]
    fn schedule_with_assignments() {
        let rows = course_page().schedule_with_assignments();

        assert_eq!(rows[0].assignments.as_ref().unwrap(), "Homework");
        assert_eq!(rows[1].assignments.as_ref().unwrap(), "Discussion Thread, Research Paper");
        assert_eq!(rows[2].assignments.as_ref().unwrap(), "");
        assert_eq!(rows[1].to_string(), "2\tIntro to Ethics\tDiscussion Thread, Research Paper");
    }

    #[test]
    fn config_overrides() {
        let config = Config::from_toml(r#"
            base_url = "https://lms.example.edu/"
            title_rewrites = []

            [selectors]
            module = ".context_module[aria-label*=Ethics]"
        "#).unwrap();
        let scraper = CoursePageScraper::new(TEST_DATA_COURSE_PAGE, &config).unwrap();
        let rows = scraper.assignments(2024);

        assert_eq!(scraper.modules().count(), 2);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].title, "Research Paper: \"Trolley\" Problems Assignment");
        assert_eq!(rows[1].href.as_ref().unwrap(), "https://lms.example.edu/courses/42/assignments/1002");
    }

    #[test]
    fn invalid_selector_override() {
        let config = Config::from_toml("[selectors]\nitem = \"li[[\"").unwrap();

        assert!(CoursePageScraper::new(TEST_DATA_COURSE_PAGE, &config).is_err());
    }
}
