//! Static page content baked in at build time.

/// The page shipped with the viewer.
pub const BUNDLED_PAGE: &str = include_str!("../assets/portfolio.html");
pub const BUNDLED_PAGE_URL: &str = "bundled:portfolio.html";

/// Details shown in the project dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetail {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tech_summary: &'static str,
}

const PROJECTS: &[ProjectDetail] = &[
    ProjectDetail {
        id: "nmap",
        title: "Website Scanning Using Nmap for Jain Hospital",
        description: "Mapped the hospital's public-facing hosts, enumerated open ports and \
            service versions, and ran targeted NSE scripts to surface outdated software \
            and misconfigured TLS. Findings were ranked by exposure and handed over with \
            remediation steps.",
        tech_summary: "Nmap, Nmap Scripting Engine (NSE), Bash",
    },
    ProjectDetail {
        id: "vapt",
        title: "Web Application VAPT for an E-Commerce Portal",
        description: "Black-box assessment of the storefront and admin panel covering the \
            OWASP Top 10. Confirmed stored XSS and an IDOR on order history, then \
            re-tested after fixes.",
        tech_summary: "Burp Suite, OWASP ZAP, SQLMap, Postman",
    },
    ProjectDetail {
        id: "siem",
        title: "SIEM Rules for a Campus Network",
        description: "Built detection rules and dashboards for brute-force logins, port \
            sweeps and suspicious PowerShell, tuned against two weeks of baseline traffic \
            to keep false positives low.",
        tech_summary: "Splunk, Sysmon, Windows Event Forwarding",
    },
    ProjectDetail {
        id: "phishing",
        title: "Phishing Awareness Simulation",
        description: "Ran a consented phishing campaign for staff, measured click and report \
            rates, and delivered short follow-up training to the most targeted teams.",
        tech_summary: "GoPhish, Postfix, Python",
    },
];

/// Every project the dialog can show.
pub fn project_catalog() -> &'static [ProjectDetail] {
    PROJECTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = project_catalog().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), project_catalog().len());
    }

    #[test]
    fn bundled_page_has_a_trigger_for_every_project() {
        for p in project_catalog() {
            assert!(
                BUNDLED_PAGE.contains(&format!("data-project=\"{}\"", p.id)),
                "no trigger for {}",
                p.id
            );
        }
    }
}
