//! Static text shown in the expanded card view.

use crate::section::SectionKind;

/// Shown when a lookup by title names no known section.
pub const MISSING_CONTENT: &str = "System data corrupted.";

const PROJECTS: &str = "
> LOADING PROJECTS DATABASE...

[1] SIEM-lite
    Lightweight Security Information and Event Management System
    Stack: Python, Log Parser, Bash, Regex, Linux
    - Collects, parses and correlates system logs from multiple sources.
    - Correlation rules flag failed-login bursts and unusual network activity.
    - Alerting and basic dashboards for real-time incident monitoring.

[2] Blood Bank AI Matching System
    Stack: Python, scikit-learn, Flask, SQLite
    - Recommends donor-recipient matches from blood type compatibility and urgency.
    - Served through a Flask backend with APIs for real-time matchmaking.

[3] AAPST
    Advanced Mobile Application Security Toolkit
    Stack: MobSF, APKTool, Drozer, Burp Suite
    - Static and dynamic analysis of APK activities, permissions and exposed components.
    - Custom test cases for session handling, insecure storage and API fuzzing.

[4] Cluster Fertilizer Dispenser
    Stack: Arduino, Sensors, Python
    - Ground-fixed dispensers with laser sensors that coordinate spraying across crop clusters.

[5] WORD-GEN
    Custom Wordlist Generator Tool
    Stack: Python, Regex, CLI
    - Rule-driven substitutions, mutations, leetspeak and encoding modes for CTF wordlists.
";

const EXPERIENCE: &str = "
> ACCESSING PERSONNEL RECORDS...

[1] Cybersecurity Intern
    International Centre for Free and Open Source Software
    - Vulnerability assessments on mobile, web and database applications.
    - Black-box and gray-box testing with OWASP ZAP, Burp Suite and MobSF.
    - Presented findings to developers and security teams during review cycles.

[2] Founder & Lead Mentor, Cybersecurity Club
    - Founded the first student-run cybersecurity community on campus.
    - Mentored students on ethical hacking, CTF strategy and tool development.

[3] Operations Lead, TinkerHub
    - Led hands-on learning initiatives and mentored first-time hackathon teams.

[4] Technical Coordinator, IEEE Student Branch
    - Coordinated technical tracks, ideathons and security workshops.
";

const SKILLS: &str = "
> LISTING TECHNICAL ARSENAL...

[SECURITY TOOLS & FRAMEWORKS]
- Burp Suite, OWASP ZAP, Wireshark, Nmap, Nikto, Metasploit
- MobSF, OWASP Top 10, MITRE ATT&CK, CVSS

[PROGRAMMING & SCRIPTING]
- Python, Bash, JavaScript, HTML/CSS, SQL
- Flask, Node.js

[OFFENSIVE SECURITY]
- Web and mobile application security testing
- Session fixation, IDOR, broken access control
- Network protocol testing: TCP, UDP, FTP

[OTHER PLATFORMS]
- Kali Linux, Parrot OS, VirtualBox, Android Studio
";

const EDUCATION: &str = "
> RETRIEVING ACADEMIC LOGS...

[1] B.Tech in Computer Science
    Toc H Institute of Science And Technology

[CERTIFICATIONS]
- Google Cloud Cybersecurity Certificate
- TryHackMe Junior Tester Certificate
";

const CONTACT: &str = "
> ESTABLISHING SECURE CONNECTION...

[NAME]
Chris Kuriakose

[EMAIL]
contact@example.com

[LINKEDIN]
linkedin.com/in/ChrisKuriakose

[GITHUB]
github.com/DUTCHBOYYOBHCTUD
";

pub fn text(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Projects => PROJECTS,
        SectionKind::Experience => EXPERIENCE,
        SectionKind::Skills => SKILLS,
        SectionKind::Education => EDUCATION,
        SectionKind::Contact => CONTACT,
    }
}

/// Lookup by display title for untyped callers (script files, JS).
pub fn lookup(title: &str) -> &'static str {
    SectionKind::from_name(title).map_or(MISSING_CONTENT, text)
}
