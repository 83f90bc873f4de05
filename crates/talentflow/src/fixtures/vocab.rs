//! Fixed vocabularies the fixture generator draws from.

pub const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Alex", "Sarah", "Mike", "Emily", "David", "Lisa", "Tom", "Anna",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];

pub const FILLER_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
];

pub const JOB_TITLES: &[&str] = &[
    "Senior Software Engineer",
    "Product Manager",
    "UX Designer",
    "Data Scientist",
    "DevOps Engineer",
    "Frontend Developer",
    "Backend Developer",
    "Marketing Manager",
    "Sales Representative",
    "Customer Success Manager",
    "QA Engineer",
    "Technical Writer",
];

pub const DEPARTMENTS: &[&str] = &[
    "Engineering", "Product", "Design", "Data", "Marketing", "Sales", "Support",
];

pub const JOB_LOCATIONS: &[&str] = &[
    "Remote", "San Francisco", "New York", "London", "Berlin", "Toronto",
];

pub const EMPLOYMENT_TYPES: &[&str] = &["Full-time", "Part-time", "Contract", "Intern"];

pub const REQUIREMENT_TECH: &[&str] = &["React", "Node.js", "Python", "AWS", "Docker", "TypeScript"];

pub const CANDIDATE_CITIES: &[&str] = &[
    "New York, NY",
    "San Francisco, CA",
    "Austin, TX",
    "Seattle, WA",
    "Boston, MA",
];

pub const CURRENT_ROLES: &[&str] = &["Software Engineer", "Product Manager", "Designer", "Data Analyst"];

pub const COMPANIES: &[&str] = &["TechCorp", "InnovateCo", "DataSoft", "CloudTech", "StartupXYZ"];

pub const SKILLS: &[&str] = &[
    "React", "TypeScript", "Node.js", "Python", "AWS", "Docker", "GraphQL", "MongoDB",
];

pub const SOURCES: &[&str] = &[
    "LinkedIn",
    "Indeed",
    "Company Website",
    "Referral",
    "Glassdoor",
    "AngelList",
];

pub const ASSESSMENT_TITLES: &[&str] = &[
    "Technical Screening",
    "Coding Challenge",
    "System Design",
    "Behavioral Interview",
    "Take-home Project",
    "Cultural Fit Assessment",
];
