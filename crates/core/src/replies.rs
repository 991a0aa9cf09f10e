//! Fixed texts the assistant uses.

/// The fixed texts shown by the assistant.
///
/// Every failure ends up in the transcript as one of these, so the user
/// never sees a raw error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Replies {
    /// The message every chat session starts with.
    pub greeting: String,
    /// Shown when the prediction service can't be reached at all.
    pub service_paused: String,
    /// Shown when the service answered with something unusable.
    pub technical_difficulties: String,
    /// Used in place of an estimate when a valid answer has no text.
    pub missing_estimate: String,
    /// Shown when the estimate task itself failed.
    pub controller_fault: String,
    /// Shown for a rejected request without detail. `{status}` is replaced
    /// by the status code.
    pub upstream_rejected: String,
}

impl Replies {
    /// Renders the rejection text for the given status.
    pub fn upstream_rejected_for(&self, status: Option<u16>) -> String {
        let status = status.map_or_else(|| "?".to_owned(), |s| s.to_string());
        self.upstream_rejected.replace("{status}", &status)
    }
}

impl Default for Replies {
    fn default() -> Self {
        Self {
            greeting: "Bonjour ! Je suis votre assistant IA spécialisé dans \
                l'estimation automobile. Pour vous fournir une évaluation \
                précise, j'aurai besoin de quelques informations sur votre \
                véhicule. Commençons par la marque et le modèle de votre \
                voiture."
                .to_owned(),
            service_paused: "Je suis hors service pour le moment ! 😴 Marou \
                m'a coupé les vivres car je suis trop gourmand en \
                ressources... Il faut qu'il me réactive ! En attendant, tu \
                peux lui envoyer un petit message pour qu'il me redonne de \
                l'énergie ! 💪"
                .to_owned(),
            technical_difficulties: "Je m'excuse, mais je rencontre quelques \
                difficultés techniques. Veuillez réessayer dans un moment."
                .to_owned(),
            missing_estimate: "Je m'excuse, mais je n'ai pas pu obtenir une \
                réponse appropriée."
                .to_owned(),
            controller_fault: "Je m'excuse, mais je rencontre quelques \
                difficultés techniques. Veuillez réessayer dans un moment."
                .to_owned(),
            upstream_rejected: "Erreur API ({status})".to_owned(),
        }
    }
}
