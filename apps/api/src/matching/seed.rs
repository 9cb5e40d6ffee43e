use crate::models::job::{MatchStatus, NewJobMatch};

/// Sample scored matches used to populate an empty find-jobs page.
pub fn sample_matches() -> Vec<NewJobMatch> {
    [
        (
            "Senior Frontend Developer",
            "TechCorp Inc.",
            "https://example.com/job/1",
            95,
            ["React experience", "TypeScript proficiency", "5+ years experience"],
        ),
        (
            "Full Stack Engineer",
            "StartupX",
            "https://example.com/job/2",
            88,
            ["Node.js experience", "AWS knowledge", "Team lead experience"],
        ),
        (
            "Software Engineer",
            "GlobalTech",
            "https://example.com/job/3",
            82,
            ["Python experience", "Machine learning basics", "Agile methodology"],
        ),
        (
            "DevOps Engineer",
            "CloudSolutions",
            "https://example.com/job/4",
            75,
            ["Docker experience", "CI/CD knowledge", "Linux administration"],
        ),
    ]
    .into_iter()
    .map(|(title, company, url, score, reasons)| NewJobMatch {
        job_title: title.to_string(),
        company_name: company.to_string(),
        job_url: Some(url.to_string()),
        match_score: score,
        match_reasons: reasons.iter().map(|r| r.to_string()).collect(),
        status: MatchStatus::Pending,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_scores_are_in_range_and_descending() {
        let samples = sample_matches();
        assert_eq!(samples.len(), 4);
        assert!(samples.iter().all(|m| (0..=100).contains(&m.match_score)));
        assert!(samples.windows(2).all(|w| w[0].match_score > w[1].match_score));
    }
}
