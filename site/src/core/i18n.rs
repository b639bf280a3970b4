//! Display strings for the presentation layer
//!
//! Locale only swaps text. Control flow, result data and error semantics
//! never depend on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    /// Parse a `lang` value, falling back to `default` for anything unknown
    pub fn parse_or(value: Option<&str>, default: Locale) -> Locale {
        value.and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Fr => &FR,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "fr" | "fr-fr" => Ok(Locale::Fr),
            _ => Err(format!("Unsupported locale: {s}")),
        }
    }
}

/// Every piece of text the page renders
#[derive(Debug)]
pub struct Strings {
    pub brand: &'static str,
    pub nav_about: &'static str,
    pub nav_services: &'static str,
    pub nav_contact: &'static str,
    pub nav_demo: &'static str,
    pub hero_title: &'static str,
    pub hero_body: &'static str,
    pub hero_cta: &'static str,
    pub about_title: &'static str,
    pub about_body: &'static str,
    pub services_title: &'static str,
    pub malaria_title: &'static str,
    pub malaria_body: &'static str,
    pub demo_title: &'static str,
    pub demo_prompt: &'static str,
    pub upload_label: &'static str,
    pub analyze_label: &'static str,
    pub uploaded_heading: &'static str,
    pub uploaded_alt: &'static str,
    pub processing: &'static str,
    pub analysis_failed: &'static str,
    pub results_heading: &'static str,
    pub result_alt: &'static str,
    pub footer_tagline: &'static str,
    pub footer_links: &'static str,
    pub footer_contact: &'static str,
    pub footer_email: &'static str,
    pub footer_phone: &'static str,
    pub footer_rights: &'static str,
}

static EN: Strings = Strings {
    brand: "AXIOME",
    nav_about: "About",
    nav_services: "Services",
    nav_contact: "Contact",
    nav_demo: "Demo",
    hero_title: "Revolutionizing Healthcare with AI",
    hero_body: "Discover how AXIOME's cutting-edge technology detects diseases with unparalleled accuracy.",
    hero_cta: "Try Demo",
    about_title: "About AXIOME",
    about_body: "AXIOME Medicare Center uses cutting-edge technology to revolutionize healthcare diagnostics. \
                 Our AI-powered solutions provide accurate and rapid disease detection, starting with our \
                 Malaria parasite detection MVP.",
    services_title: "Our Services",
    malaria_title: "Malaria Detection",
    malaria_body: "AI-powered analysis of blood samples for rapid malaria parasite detection.",
    demo_title: "Try Our Demo",
    demo_prompt: "Upload an image for malaria parasite detection:",
    upload_label: "Upload Image",
    analyze_label: "Analyze",
    uploaded_heading: "Uploaded Image:",
    uploaded_alt: "Uploaded",
    processing: "Processing image...",
    analysis_failed: "Failed to process image. Please try again.",
    results_heading: "Results:",
    result_alt: "Processed",
    footer_tagline: "Revolutionizing healthcare with AI",
    footer_links: "Quick Links",
    footer_contact: "Contact Us",
    footer_email: "Email: info@axiome.com",
    footer_phone: "Phone: (123) 456-7890",
    footer_rights: "© 2024 AXIOME Medicare Center. All rights reserved.",
};

static FR: Strings = Strings {
    brand: "AXIOME",
    nav_about: "À propos",
    nav_services: "Services",
    nav_contact: "Contact",
    nav_demo: "Démo",
    hero_title: "Révolutionner la santé grâce à l'IA",
    hero_body: "Découvrez comment la technologie d'AXIOME détecte les maladies avec une précision inégalée.",
    hero_cta: "Essayer la démo",
    about_title: "À propos d'AXIOME",
    about_body: "AXIOME Medicare Center utilise une technologie de pointe pour révolutionner le diagnostic médical. \
                 Nos solutions fondées sur l'IA offrent une détection rapide et précise des maladies, à commencer \
                 par notre MVP de détection du parasite du paludisme.",
    services_title: "Nos services",
    malaria_title: "Détection du paludisme",
    malaria_body: "Analyse d'échantillons sanguins par IA pour une détection rapide du parasite du paludisme.",
    demo_title: "Essayez notre démo",
    demo_prompt: "Téléversez une image pour la détection du parasite du paludisme :",
    upload_label: "Téléverser une image",
    analyze_label: "Analyser",
    uploaded_heading: "Image téléversée :",
    uploaded_alt: "Image téléversée",
    processing: "Traitement de l'image...",
    analysis_failed: "Échec du traitement de l'image. Veuillez réessayer.",
    results_heading: "Résultats :",
    result_alt: "Image traitée",
    footer_tagline: "Révolutionner la santé grâce à l'IA",
    footer_links: "Liens rapides",
    footer_contact: "Nous contacter",
    footer_email: "E-mail : info@axiome.com",
    footer_phone: "Téléphone : (123) 456-7890",
    footer_rights: "© 2024 AXIOME Medicare Center. Tous droits réservés.",
};
