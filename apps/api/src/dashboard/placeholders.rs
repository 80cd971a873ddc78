//! Static placeholder content for the dashboard panels that are not yet
//! backed by real analysis. The suggestion and job-match lists are populated
//! when the pipeline reaches `Ready`; the career path is always shown.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareerStep {
    pub role: String,
    pub company: String,
    pub period: String,
}

pub fn career_path() -> Vec<CareerStep> {
    [
        ("Senior Software Engineer", "TechCorp", "2020 - Present"),
        ("Full Stack Developer", "WebSolutions Inc.", "2017 - 2020"),
        ("Junior Developer", "StartupXYZ", "2015 - 2017"),
    ]
    .into_iter()
    .map(|(role, company, period)| CareerStep {
        role: role.to_string(),
        company: company.to_string(),
        period: period.to_string(),
    })
    .collect()
}

pub fn suggestions() -> Vec<String> {
    [
        "Add more quantifiable achievements",
        "Improve your summary statement",
        "Include relevant keywords",
        "Enhance your skills section",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn job_matches() -> Vec<String> {
    [
        "Software Engineer at TechCorp",
        "Full Stack Developer at WebSolutions",
        "Frontend Specialist at UX Innovators",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
