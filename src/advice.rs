//! Static advice table and constitution descriptions

use crate::Category;
use serde::Serialize;

/// Diet and lifestyle guidance for one category
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRecord {
    /// Foods to favor
    pub favorable: &'static [&'static str],
    /// Foods to avoid or minimize
    pub avoid: &'static [&'static str],
    /// Daily routine
    pub routine: &'static str,
    pub exercise: &'static str,
    /// Stress management
    pub stress: &'static str,
}

/// Advice selected for a primary and secondary category.
///
/// Only the primary category's record is carried. The secondary category
/// appears by name and percentage only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub primary: Category,
    pub primary_percentage: f64,
    pub secondary: Category,
    pub secondary_percentage: f64,
    pub record: &'static AdviceRecord,
}

static VATA: AdviceRecord = AdviceRecord {
    favorable: &[
        "Warm, cooked foods",
        "Sweet, sour, and salty tastes",
        "Ghee and oils",
        "Dairy products",
        "Nuts and seeds",
        "Root vegetables",
    ],
    avoid: &[
        "Cold, raw foods",
        "Bitter and astringent tastes",
        "Dry, light foods",
        "Carbonated drinks",
        "Caffeine",
    ],
    routine: "Regular sleep schedule (10 PM - 6 AM), warm oil massage, gentle exercise like yoga and walking",
    exercise: "Gentle, grounding exercises like walking, swimming, tai chi, and restorative yoga",
    stress: "Meditation, deep breathing, warm baths, calming music",
};

static PITTA: AdviceRecord = AdviceRecord {
    favorable: &[
        "Cooling foods",
        "Sweet, bitter, and astringent tastes",
        "Fresh vegetables",
        "Sweet fruits",
        "Dairy products",
        "Grains",
    ],
    avoid: &[
        "Hot, spicy foods",
        "Sour and salty tastes",
        "Fermented foods",
        "Alcohol",
        "Red meat",
        "Excessive oil",
    ],
    routine: "Early to bed (10 PM), early to rise (6 AM), cooling practices, moderate exercise",
    exercise: "Moderate exercise like swimming, cycling, and cooling yoga practices",
    stress: "Cooling meditation, moon gazing, spending time in nature",
};

static KAPHA: AdviceRecord = AdviceRecord {
    favorable: &[
        "Light, dry foods",
        "Bitter, pungent, and astringent tastes",
        "Honey",
        "Legumes",
        "Light vegetables",
        "Spices",
    ],
    avoid: &[
        "Heavy, oily foods",
        "Sweet, sour, and salty tastes",
        "Dairy products",
        "Cold foods",
        "Excessive water",
    ],
    routine: "Early rising (6 AM), vigorous exercise, dry massage, stimulating practices",
    exercise: "Vigorous exercise like running, dancing, power yoga, and strength training",
    stress: "Stimulating activities, energizing music, social engagement",
};

/// Tips shown with every advice page
pub const PRACTICAL_TIPS: [&str; 4] = [
    "Start with small changes and gradually incorporate these recommendations",
    "Listen to your body and adjust practices as needed",
    "Consider consulting with an Ayurvedic practitioner for personalized guidance",
    "Maintain consistency in your daily routine for best results",
];

/// The advice record for a category
pub fn record(category: Category) -> &'static AdviceRecord {
    match category {
        Category::Vata => &VATA,
        Category::Pitta => &PITTA,
        Category::Kapha => &KAPHA,
    }
}

/// Name with elements, e.g. "Vata (Air + Ether)"
pub fn display_name(category: Category) -> &'static str {
    match category {
        Category::Vata => "Vata (Air + Ether)",
        Category::Pitta => "Pitta (Fire + Water)",
        Category::Kapha => "Kapha (Earth + Water)",
    }
}

/// One-paragraph description of a dominant constitution
pub fn description(category: Category) -> &'static str {
    match category {
        Category::Vata => "Creative, quick-thinking, and adaptable. You tend to be energetic and imaginative but may experience anxiety and irregular habits.",
        Category::Pitta => "Intelligent, focused, and driven. You are goal-oriented and competitive but may be prone to anger and inflammation.",
        Category::Kapha => "Strong, loyal, and patient. You are dependable and nurturing but may be prone to weight gain and lethargy.",
    }
}

/// Seasonal note for the primary category
pub fn seasonal_note(category: Category) -> String {
    format!(
        "As a {} type, pay special attention to balancing your constitution during seasonal changes. \
         Consider adjusting your diet and lifestyle practices accordingly.",
        category.id()
    )
}
