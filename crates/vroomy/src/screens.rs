//! Rendering of the landing page and of chat messages.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use vroomy_core::{ChatMessage, Role};

const BAR_CHAR: &str = "▎";

/// Sample car descriptions offered on the chat screen.
pub const SUGGESTIONS: [&str; 2] = [
    "Je recherche une Ford Fiesta de 2023. C'est un modèle Manual avec un \
     moteur 1.0L Petrol. Elle a 13427 miles au compteur, consomme 65.7 mpg \
     et a une taxe annuelle de 145 €. Quel est son prix ?",
    "Je recherche une Golf de 2020. C'est un modèle Manual avec un moteur \
     1.0L Petrol. Elle a 13427 miles au compteur, consomme 65.7 mpg et a une \
     taxe annuelle de 145 £. Quel est son prix ?",
];

/// Hint printed when entering the chat screen.
pub const CHAT_HINT: &str = "Parlez-moi de votre voiture (marque, modèle, \
    année, kilométrage)... /suggest, /use <n>, /back, /quit";

const FEATURES: [(&str, &str); 3] = [
    (
        "Résultats Instantanés",
        "Obtenez l'estimation de votre véhicule en quelques secondes.",
    ),
    (
        "Intelligence Marché",
        "Notre plateforme suit les tendances tarifaires en temps réel.",
    ),
    (
        "Précision de Confiance",
        "Basé sur des données automobiles vérifiées.",
    ),
];

/// Renders the landing page.
pub fn landing() -> String {
    let mut out = String::new();
    let bar = BAR_CHAR.bright_yellow();

    writeln!(out, "\n{bar}{}", "Vroomy".bright_white().bold()).ok();
    writeln!(out, "{bar}Estimation IA Révolutionnaire").ok();
    writeln!(
        out,
        "\n  Découvrez la {} de Votre Auto\n",
        "Vraie Valeur".bright_yellow().bold()
    )
    .ok();
    for (title, blurb) in FEATURES {
        writeln!(out, "  {} {}", "•".bright_yellow(), title.bold()).ok();
        writeln!(out, "    {}", blurb.dimmed()).ok();
    }
    writeln!(
        out,
        "\n  Appuyez sur {} pour démarrer mon estimation, {} pour quitter.",
        "Entrée".bright_white().bold(),
        "q".bright_white().bold()
    )
    .ok();
    writeln!(
        out,
        "\n{}",
        "© 2025 Vroomy. Révolutionner l'estimation automobile avec la \
         précision de l'IA."
            .dimmed()
    )
    .ok();
    out
}

/// Renders one chat message with its role glyph and time.
pub fn message(message: &ChatMessage) -> String {
    let time = message.display_time();
    match message.role() {
        Role::Assistant => format!(
            "{}🤖 {} {}",
            BAR_CHAR.bright_cyan(),
            time.dimmed(),
            message.content().bright_white()
        ),
        Role::User => format!(
            "{}👤 {} {}",
            BAR_CHAR.bright_green(),
            time.dimmed(),
            message.content()
        ),
    }
}

/// Renders the numbered list of suggestions.
pub fn suggestions() -> String {
    let mut out = String::from("Suggestions :\n");
    for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
        writeln!(out, "  {} {}", format!("[{}]", i + 1).bold(), suggestion)
            .ok();
    }
    out
}

/// Returns the suggestion with the given 1-based index.
#[inline]
pub fn suggestion(index: usize) -> Option<&'static str> {
    index.checked_sub(1).and_then(|i| SUGGESTIONS.get(i)).copied()
}
