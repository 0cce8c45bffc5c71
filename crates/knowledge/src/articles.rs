//! The compiled-in article set.

/// One knowledge base article.
pub struct Article {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub content: &'static str,
}

pub const ARTICLES: &[Article] = &[
    Article {
        topic: "Donor Eligibility",
        keywords: &["eligible", "eligibility", "qualify", "age", "weight", "requirements", "can i donate"],
        content: "Basic requirements for whole blood donation:\n\n• Be at least 17 years old (16 with parental consent in some states)\n\n• Weigh at least 110 pounds (50 kg)\n\n• Be in good general health and feeling well\n\n• Wait at least 56 days between whole blood donations\n\nSome medications, recent travel, and certain medical conditions may require a temporary deferral. Staff will review your health history at every visit.",
    },
    Article {
        topic: "Blood Types and Compatibility",
        keywords: &["blood type", "type o", "type a", "type b", "type ab", "universal", "compatibility", "rh", "negative", "positive"],
        content: "The eight common blood types and who they help:\n\n• O negative: universal red cell donor, always in demand for emergencies\n\n• O positive: the most common type, compatible with all positive types\n\n• AB positive: universal plasma recipient\n\n• AB negative: universal plasma donor\n\nA and B types can give to their own group and to AB. Knowing your type helps us direct your donation where it matters most.",
    },
    Article {
        topic: "The Donation Process",
        keywords: &["process", "procedure", "how long", "what happens", "steps", "appointment", "needle"],
        content: "What to expect when you donate:\n\n1. Registration: photo ID check and a short health questionnaire\n\n2. Mini-physical: temperature, pulse, blood pressure, and hemoglobin check\n\n3. Donation: the draw itself takes about 8-10 minutes\n\n4. Refreshments: rest for 10-15 minutes with a snack and a drink\n\nThe whole visit usually takes about an hour from door to door.",
    },
    Article {
        topic: "Preparing for Your Donation",
        keywords: &["prepare", "preparation", "before donating", "eat", "drink", "hydrate", "sleep", "iron"],
        content: "How to have a smooth donation:\n\n• Drink an extra 16 oz of water before your appointment\n\n• Eat a healthy, iron-rich meal beforehand and avoid fatty foods\n\n• Get a good night's sleep\n\n• Bring a photo ID and a list of any medications you take\n\n• Wear a shirt with sleeves that roll up easily\n\nAfterward, keep hydrating and avoid heavy lifting for the rest of the day.",
    },
    Article {
        topic: "Donation Types",
        keywords: &["plasma", "platelets", "double red", "apheresis", "whole blood", "power red"],
        content: "Ways to give beyond whole blood:\n\n• Whole blood: the standard donation, about 10 minutes, every 56 days\n\n• Power red: two units of red cells by apheresis, every 112 days\n\n• Platelets: vital for cancer patients, takes 2-3 hours, every 7 days up to 24 times a year\n\n• Plasma: used for trauma and burn patients, every 28 days\n\nAsk our staff which donation type your blood type supports best.",
    },
    Article {
        topic: "Why Your Donation Matters",
        keywords: &["why", "impact", "help", "save", "lives", "shortage", "need"],
        content: "Your donation matters:\n\n• One donation can save up to three lives\n\n• Someone needs blood every two seconds\n\n• Blood cannot be manufactured, it only comes from donors\n\n• Less than 40% of the population is eligible, and far fewer actually give\n\nRegular donors are the backbone of a stable blood supply for hospitals and emergency services.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_article_has_keywords_and_content() {
        for article in ARTICLES {
            assert!(!article.topic.is_empty());
            assert!(!article.keywords.is_empty(), "{} has no keywords", article.topic);
            assert!(!article.content.is_empty(), "{} has no content", article.topic);
        }
    }

    #[test]
    fn keywords_are_lowercase() {
        for article in ARTICLES {
            for keyword in article.keywords {
                assert_eq!(*keyword, keyword.to_lowercase(), "in {}", article.topic);
            }
        }
    }
}
