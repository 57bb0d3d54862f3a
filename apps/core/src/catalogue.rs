//! Static health content: quick remedies for common problems and adoptable health plans.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickSolution {
    pub name: &'static str,
    pub description: &'static str,
    pub medicine: &'static str,
    pub home_remedy: &'static str,
    pub precautions: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthPlan {
    pub name: &'static str,
    pub description: &'static str,
    pub diet: &'static str,
    pub exercise: &'static str,
    pub lifestyle: &'static str,
}

pub const QUICK_SOLUTIONS: &[QuickSolution] = &[
    QuickSolution {
        name: "Fever",
        description: "Body temperature above normal range, often accompanied by chills",
        medicine: "Paracetamol 500mg, Ibuprofen (as prescribed)",
        home_remedy: "Rest, plenty of fluids, cool compress on forehead",
        precautions: "Monitor temperature, seek medical help if fever persists >3 days",
    },
    QuickSolution {
        name: "Common Cold",
        description: "Runny nose, sneezing, mild fever, sore throat",
        medicine: "Antihistamines, decongestants (as prescribed)",
        home_remedy: "Warm saltwater gargling, honey with warm water, steam inhalation",
        precautions: "Rest, avoid cold drinks, wear warm clothes",
    },
    QuickSolution {
        name: "Headache",
        description: "Pain in head or neck region, tension or migraine type",
        medicine: "Paracetamol, Aspirin (as prescribed)",
        home_remedy: "Head massage, cold/warm compress, adequate sleep",
        precautions: "Avoid stress, stay hydrated, limit screen time",
    },
    QuickSolution {
        name: "Stomach Ache",
        description: "Abdominal pain, cramping, digestive discomfort",
        medicine: "Antacids, ORS solution (as prescribed)",
        home_remedy: "Ginger tea, BRAT diet (banana, rice, apple, toast)",
        precautions: "Avoid spicy/oily food, eat light meals, stay hydrated",
    },
    QuickSolution {
        name: "Cough",
        description: "Dry or productive cough, throat irritation",
        medicine: "Cough syrup, lozenges (as prescribed)",
        home_remedy: "Honey with warm water, turmeric milk, steam inhalation",
        precautions: "Avoid cold beverages, cover mouth while coughing",
    },
];

pub const HEALTH_PLANS: &[HealthPlan] = &[
    HealthPlan {
        name: "Weight Gain Plan",
        description: "Healthy weight gain program for underweight individuals",
        diet: "High-calorie nutritious foods, protein-rich meals, healthy fats",
        exercise: "Strength training 3x/week, compound exercises, progressive overload",
        lifestyle: "Regular meals, adequate sleep (7-8 hours), stress management",
    },
    HealthPlan {
        name: "Liver Care Plan",
        description: "Comprehensive liver health maintenance program",
        diet: "Low-fat diet, avoid alcohol, increase fiber intake, green vegetables",
        exercise: "Moderate cardio 30 min daily, yoga, walking",
        lifestyle: "Avoid processed foods, regular health checkups, maintain healthy weight",
    },
    HealthPlan {
        name: "Heart Health Plan",
        description: "Cardiovascular health improvement program",
        diet: "Low sodium, omega-3 rich foods, fruits and vegetables",
        exercise: "Cardio exercises, brisk walking, swimming",
        lifestyle: "No smoking, limit alcohol, stress reduction, regular BP monitoring",
    },
    HealthPlan {
        name: "Diabetes Management",
        description: "Blood sugar control and diabetes management plan",
        diet: "Low glycemic index foods, portion control, regular meal timing",
        exercise: "Daily 30-45 min physical activity, strength training",
        lifestyle: "Regular glucose monitoring, medication compliance, foot care",
    },
];

/// Case-insensitive lookup by plan name.
pub fn find_plan(name: &str) -> Option<&'static HealthPlan> {
    let name = name.trim();
    HEALTH_PLANS.iter().find(|plan| plan.name.eq_ignore_ascii_case(name))
}

/// Chat rendering of the quick solutions.
pub fn quick_solutions_text() -> String {
    let mut text = String::from("💊 *QUICK HEALTH SOLUTIONS* 💊\n\n*Common Problems & Remedies:*\n");
    for solution in QUICK_SOLUTIONS {
        text.push_str(&format!(
            "\n*{}*\n• Medicine: {}\n• Home remedy: {}\n• Precautions: {}\n",
            solution.name, solution.medicine, solution.home_remedy, solution.precautions
        ));
    }
    text.push_str("\n💡 *Need more specific advice?* Just describe your symptoms and I'll provide personalized guidance!");
    text
}

/// Chat rendering of the health plans.
pub fn health_plans_text() -> String {
    let mut text = String::from("📅 *HEALTH PLANS* 📅\n\n*Available Plans:*\n");
    for plan in HEALTH_PLANS {
        text.push_str(&format!(
            "\n*{}*\n• Diet: {}\n• Exercise: {}\n• Lifestyle: {}\n",
            plan.name, plan.diet, plan.exercise, plan.lifestyle
        ));
    }
    text.push_str("\n💡 *Want to follow a plan?* Adopt it from your profile on the web platform.");
    text
}
