//! Fixed message template sets.
//!
//! Two sets of parameterized strings: wish messages produced by the
//! suggestion operation, and short comments produced when a viewer comments
//! on a feed card. Both are data — selection among them goes through
//! [`crate::rng::RandomSource`] so tests can pin the index.

/// Wish-message templates. Placeholders: `{first_name}`, `{role}`
/// (the draft's effective role), `{keywords}`.
pub const WISH_TEMPLATES: [&str; 4] = [
  "Joyeux anniversaire {first_name} ! En tant que {role}, votre expertise \
   en {keywords} inspire toute l'équipe. Que cette nouvelle année vous \
   apporte encore plus de succès et d'innovations ! 🎉",
  "Happy Birthday {first_name}! Votre passion pour {keywords} et votre \
   rôle de {role} font de vous un membre précieux de GDG Bukavu. Profitez \
   de votre journée spéciale ! ✨",
  "Félicitations {first_name} pour cette nouvelle année ! Grâce à votre \
   talent en {keywords}, vous contribuez grandement au succès de notre \
   communauté. Que cette année soit remplie de défis passionnants ! 🚀",
  "Joyeux anniversaire à notre formidable {role} ! Votre maîtrise de \
   {keywords} et votre dévouement sont remarquables. Passez une excellente \
   journée {first_name} ! 🎂",
];

/// Comment templates. No parameters; purely advisory display text.
pub const COMMENT_TEMPLATES: [&str; 5] = [
  "Joyeux anniversaire ! 🎉",
  "Happy Birthday! Hope you have a wonderful day! 🎂",
  "Félicitations pour cette nouvelle année ! 🎈",
  "Wishing you all the best! 🌟",
  "Amazing work, happy birthday! 💪",
];

/// Interpolate a wish template with the draft's values.
pub fn render_wish(
  template: &str,
  first_name: &str,
  role: &str,
  keywords: &str,
) -> String {
  template
    .replace("{first_name}", first_name)
    .replace("{role}", role)
    .replace("{keywords}", keywords)
}
