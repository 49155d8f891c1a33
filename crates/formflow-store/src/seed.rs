// SPDX-License-Identifier: Apache-2.0

//! Organization reference data loaded by `seed_master_data`.

/// `(dept_id, name, level_category)`
pub const SEED_DEPARTMENTS: [(&str, &str, &str); 10] = [
    ("D001", "GIS (Geographic Information System)", "Operational"),
    ("D002", "Satellite Communication", "Strategic"),
    ("D003", "Software Development", "Strategic"),
    ("D004", "Defence & Strategic Applications", "Tactical"),
    ("D005", "Remote Sensing & Image Analysis", "Operational"),
    ("D006", "Geo-Informatics", "Tactical"),
    ("D007", "Environmental Mapping & Modelling", "Operational"),
    ("D008", "E-Governance Applications", "Strategic"),
    ("D009", "AI & Data Analytics", "Strategic"),
    ("D010", "Web & Mobile Application Development", "Tactical"),
];

/// `(level_id, name)`
pub const SEED_LEVELS: [(&str, &str); 3] = [
    ("L001", "Strategic"),
    ("L002", "Tactical"),
    ("L003", "Operational"),
];

/// `(desig_id, name, dept_id, level_id)`
pub const SEED_DESIGNATIONS: [(&str, &str, &str, &str); 55] = [
    ("DS001", "GIS Analyst", "D001", "L003"),
    ("DS002", "GIS Engineer", "D001", "L003"),
    ("DS003", "GIS Developer", "D001", "L003"),
    ("DS004", "Spatial Data Specialist", "D001", "L003"),
    ("DS005", "GIS Project Executive", "D001", "L003"),
    ("DS006", "GIS Technician", "D001", "L003"),
    ("DS007", "Satellite Communication Engineer", "D002", "L001"),
    ("DS008", "RF Engineer", "D002", "L001"),
    ("DS009", "Network Operations Executive", "D002", "L001"),
    ("DS010", "Satellite Monitoring Officer", "D002", "L001"),
    ("DS011", "Communication Systems Analyst", "D002", "L001"),
    ("DS012", "Software Developer", "D003", "L001"),
    ("DS013", "Full Stack Developer", "D003", "L001"),
    ("DS014", "Backend Developer", "D003", "L001"),
    ("DS015", "Frontend Developer", "D003", "L001"),
    ("DS016", "Project Leader", "D003", "L001"),
    ("DS017", "Software Testing Engineer", "D003", "L001"),
    ("DS018", "DevOps Engineer", "D003", "L001"),
    ("DS019", "Systems Engineer", "D004", "L002"),
    ("DS020", "Cybersecurity Analyst", "D004", "L002"),
    ("DS021", "Application Developer – Strategic Tools", "D004", "L002"),
    ("DS022", "Intelligence Support Executive", "D004", "L002"),
    ("DS023", "Defence Software Consultant", "D004", "L002"),
    ("DS024", "Remote Sensing Analyst", "D005", "L003"),
    ("DS025", "Image Processing Engineer", "D005", "L003"),
    ("DS026", "Data Interpretation Executive", "D005", "L003"),
    ("DS027", "Satellite Imagery Specialist", "D005", "L003"),
    ("DS028", "RS-GIS Technician", "D005", "L003"),
    ("DS029", "Geo-Informatics Engineer", "D006", "L002"),
    ("DS030", "Spatial Database Analyst", "D006", "L002"),
    ("DS031", "Mapping Executive", "D006", "L002"),
    ("DS032", "Cartographic Technician", "D006", "L002"),
    ("DS033", "Geospatial Application Developer", "D006", "L002"),
    ("DS034", "Environmental Analyst", "D007", "L003"),
    ("DS035", "Modelling Engineer", "D007", "L003"),
    ("DS036", "Data Visualization Specialist", "D007", "L003"),
    ("DS037", "Remote Environmental Monitor", "D007", "L003"),
    ("DS038", "Climate Data Technician", "D007", "L003"),
    ("DS039", "E-Governance Software Developer", "D008", "L001"),
    ("DS040", "Application Support Executive", "D008", "L001"),
    ("DS041", "UI/UX Designer", "D008", "L001"),
    ("DS042", "Systems Integration Executive", "D008", "L001"),
    ("DS043", "Government IT Consultant", "D008", "L001"),
    ("DS044", "Data Scientist", "D009", "L001"),
    ("DS045", "AI Developer", "D009", "L001"),
    ("DS046", "Machine Learning Engineer", "D009", "L001"),
    ("DS047", "Data Analyst", "D009", "L001"),
    ("DS048", "NLP Engineer", "D009", "L001"),
    ("DS049", "Deep Learning Engineer", "D009", "L001"),
    ("DS050", "Web Developer", "D010", "L002"),
    ("DS051", "Mobile App Developer (Android/iOS)", "D010", "L002"),
    ("DS052", "UI/UX Designer", "D010", "L002"),
    ("DS053", "React Developer", "D010", "L002"),
    ("DS054", "Flutter Developer", "D010", "L002"),
    ("DS055", "App Tester", "D010", "L002"),
];
