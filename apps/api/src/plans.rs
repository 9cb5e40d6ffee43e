use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Plan {
    pub name: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
}

pub static PLANS: [Plan; 3] = [
    Plan {
        name: "Basic",
        price: "$9.99",
        features: &[
            "Up to 5 job applications per month",
            "Basic job matching",
            "Email templates",
            "Resume storage",
        ],
        popular: false,
    },
    Plan {
        name: "Pro",
        price: "$19.99",
        features: &[
            "Unlimited job applications",
            "Advanced job matching",
            "Custom email templates",
            "Resume and cover letter storage",
            "Priority support",
        ],
        popular: true,
    },
    Plan {
        name: "Enterprise",
        price: "Custom",
        features: &[
            "Everything in Pro",
            "Custom integrations",
            "Dedicated account manager",
            "Team collaboration",
            "API access",
        ],
        popular: false,
    },
];

/// GET /api/v1/plans
pub async fn handle_list_plans() -> Json<&'static [Plan]> {
    Json(&PLANS)
}
