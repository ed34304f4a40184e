//! Random user generation for seeding the store and the "new user" command.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::UserCreate;

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Diego", "Elisa", "Felipe", "Gabriela", "Heitor",
    "Isabela", "João", "Larissa", "Marcos", "Natália", "Otávio", "Paula", "Rafael",
    "Sofia", "Tiago", "Valentina", "Yuri",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Barbosa", "Cardoso", "Costa", "Ferreira", "Gomes", "Lima", "Martins",
    "Moreira", "Oliveira", "Pereira", "Ribeiro", "Rocha", "Santos", "Silva", "Souza",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "mail.test", "inbox.test"];

/// Generates a plausible random name and matching email address.
pub fn random_user() -> UserCreate {
    random_user_with(&mut rand::rng())
}

pub fn random_user_with<R: Rng + ?Sized>(rng: &mut R) -> UserCreate {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ana");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Silva");
    let domain = DOMAINS.choose(rng).copied().unwrap_or("example.com");
    let suffix: u16 = rng.random_range(1..1000);

    let local = format!("{}.{}{}", ascii_lower(first), ascii_lower(last), suffix);
    UserCreate::new(format!("{first} {last}"), format!("{local}@{domain}"))
}

/// Lower-cases and strips accents so the name is usable as an email local part.
fn ascii_lower(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' => 'a',
            'é' | 'ê' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
