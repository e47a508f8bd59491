// Constantes compartidas del cliente

/// Placeholder que devuelve el backend cuando el usuario no tiene foto de perfil
pub const NULL_PROFILE_IMAGE_URL: &str = "https://minio.nutech-integrasi.com/take-home-test/null";

/// Imagen local usada cuando no hay foto de perfil
pub const DEFAULT_PROFILE_IMAGE: &str = "Profile Photo.png";

/// Nominales sugeridos en la pantalla de Top Up
pub const TOPUP_PRESETS: [u64; 6] = [10_000, 20_000, 50_000, 100_000, 250_000, 500_000];

/// Tipos MIME aceptados para la foto de perfil
pub const ALLOWED_AVATAR_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Tamaño máximo de la foto de perfil (100 KB)
pub const MAX_AVATAR_BYTES: usize = 100 * 1024;
