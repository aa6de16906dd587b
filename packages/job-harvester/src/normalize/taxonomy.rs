/// Job groups in priority order; classification returns the first entry with
/// a keyword contained in the lower-cased title. Order is load-bearing:
/// specific groups (Intern, Java Developer) must sit above the catch-all
/// Software Engineer keywords.
pub const JOB_GROUPS: &[(&str, &[&str])] = &[
    ("Intern", &["thực tập sinh", "intern"]),
    ("Project Management", &["project manager", "quản lý dự án", "scrum master"]),
    ("Product Management", &["product owner"]),
    ("Tech Lead", &["tech lead", "trưởng nhóm", "trưởng bộ phận"]),
    ("Business Analyst", &["business analyst", "ba"]),
    ("Tester", &["qa", "tester"]),
    ("IT Support", &["it support", "helpdesk", "triển khai phần mềm", "cộng tác viên it"]),
    ("System", &["system admin", "infra"]),
    ("DevOps", &["devops", "sre"]),
    ("Data", &["ai engineer", "business intelligence", "bi", "big data"]),
    ("Fullstack Developer", &["full-stack"]),
    ("Frontend Developer", &["front end", "angularjs", "vuejs", "web designer", "html/css"]),
    ("Backend Developer", &["backend"]),
    ("Mobile Developer", &["mobile"]),
    (".NET Developer", &[".net"]),
    ("Java Developer", &["java"]),
    ("Embedded Developer", &["embedded"]),
    ("Software Engineer", &["developer", "lập trình", "engineer", "phần mềm", "web"]),
    ("Business Development", &["business development"]),
    ("Marketing", &["marketing"]),
    ("Admin", &["secretary", "thư ký"]),
];

/// Sentinel group for titles no table entry matches.
pub const OTHER_GROUP: &str = "Other";

pub fn classify_title(title: &str) -> &'static str {
    let lowered = title.to_lowercase();
    let title = lowered.trim();

    for (label, keywords) in JOB_GROUPS {
        if keywords.iter().any(|keyword| title.contains(keyword)) {
            return label;
        }
    }

    OTHER_GROUP
}
