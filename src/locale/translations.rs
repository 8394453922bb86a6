use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// One concept and its spellings across languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationGroup {
    pub canonical: &'static str,
    pub variants: &'static [&'static str],
}

/// Built-in dictionary of common site sections.
///
/// Variants are ASCII-folded slugs as they typically appear in URLs. When a
/// spelling is listed under two concepts, the later concept wins.
pub const COMMON_TRANSLATIONS: &[TranslationGroup] = &[
    TranslationGroup {
        canonical: "about",
        variants: &[
            "about", "about-us", "aboutus",
            "sobre-nosotros", "sobre", "acerca-de", "acerca", "quienes-somos",
            "chi-siamo", "su-di-noi", "chi-sono", "riguardo",
            "a-propos", "qui-sommes-nous",
            "uber-uns", "ueber-uns", "wir",
            "sobre-nos", "quem-somos",
            "o-nas", "o-firme",
            "hakkimizda", "hakkinda",
            "tentang-kami", "tentang",
        ],
    },
    TranslationGroup {
        canonical: "products",
        variants: &[
            "products", "product",
            "productos", "producto",
            "prodotti", "prodotto",
            "produits", "produit",
            "produkte", "produkt",
            "produtos", "produto",
            "produkty", "produkt",
            "urunler", "urun",
        ],
    },
    TranslationGroup {
        canonical: "services",
        variants: &[
            "services", "service",
            "servicios", "servicio",
            "servizi", "servizio",
            "services", "service",
            "dienstleistungen", "dienste",
            "servicos", "servico",
            "uslugi", "usluga",
            "hizmetler", "hizmet",
        ],
    },
    TranslationGroup {
        canonical: "contact",
        variants: &[
            "contact", "contact-us", "contactus",
            "contacto", "contactanos", "contactenos",
            "contatti", "contattaci",
            "contact", "contactez-nous",
            "kontakt", "kontaktieren",
            "contato", "fale-conosco",
            "kontakt", "kontaktuj",
            "iletisim",
        ],
    },
    TranslationGroup {
        canonical: "news",
        variants: &[
            "news", "blog", "articles",
            "noticias", "novedades", "articulos",
            "notizie", "novita", "articoli",
            "nouvelles", "actualites", "blog",
            "nachrichten", "neuigkeiten", "blog",
            "noticias", "novidades", "artigos",
            "wiadomosci", "aktualnosci",
            "haberler", "blog",
        ],
    },
    TranslationGroup {
        canonical: "help",
        variants: &[
            "help", "support", "faq",
            "ayuda", "soporte", "preguntas-frecuentes",
            "aiuto", "supporto", "domande-frequenti",
            "aide", "support", "faq",
            "hilfe", "support", "faq",
            "ajuda", "suporte", "perguntas-frequentes",
            "pomoc", "wsparcie",
            "yardim", "destek",
        ],
    },
    TranslationGroup {
        canonical: "privacy",
        variants: &[
            "privacy", "privacy-policy",
            "privacidad", "politica-de-privacidad",
            "privacy", "politica-sulla-privacy",
            "confidentialite", "politique-de-confidentialite",
            "datenschutz", "datenschutzrichtlinie",
            "privacidade", "politica-de-privacidade",
            "prywatnosc", "polityka-prywatnosci",
            "gizlilik", "gizlilik-politikasi",
        ],
    },
    TranslationGroup {
        canonical: "terms",
        variants: &[
            "terms", "terms-of-service", "terms-and-conditions",
            "terminos", "terminos-de-servicio", "condiciones",
            "termini", "termini-di-servizio", "condizioni",
            "conditions", "conditions-utilisation",
            "bedingungen", "nutzungsbedingungen", "agb",
            "termos", "termos-de-servico", "condicoes",
            "warunki", "regulamin",
            "sartlar", "kullanim-kosullari",
        ],
    },
    TranslationGroup {
        canonical: "account",
        variants: &[
            "account", "profile", "user",
            "cuenta", "perfil", "usuario",
            "account", "profilo", "utente",
            "compte", "profil", "utilisateur",
            "konto", "profil", "benutzer",
            "conta", "perfil", "usuario",
            "konto", "profil", "uzytkownik",
            "hesap", "profil", "kullanici",
        ],
    },
    TranslationGroup {
        canonical: "login",
        variants: &[
            "login", "signin", "sign-in",
            "iniciar-sesion", "ingresar", "entrar",
            "accedi", "accesso", "login",
            "connexion", "se-connecter",
            "anmelden", "einloggen", "login",
            "entrar", "login", "iniciar-sessao",
            "zaloguj", "logowanie",
            "giris", "giris-yap",
        ],
    },
    TranslationGroup {
        canonical: "signup",
        variants: &[
            "signup", "register", "sign-up",
            "registrarse", "registro", "crear-cuenta",
            "registrati", "registrazione", "iscriviti",
            "inscription", "sinscrire", "creer-compte",
            "registrieren", "anmelden", "konto-erstellen",
            "cadastro", "registrar", "criar-conta",
            "rejestracja", "zarejestruj",
            "kayit", "kayit-ol", "uye-ol",
        ],
    },
    TranslationGroup {
        canonical: "home",
        variants: &[
            "home", "index", "main",
            "inicio", "principal", "casa",
            "home", "inizio", "principale",
            "accueil", "index", "principale",
            "startseite", "home", "hauptseite",
            "inicio", "pagina-inicial", "principal",
            "strona-glowna", "start",
            "ana-sayfa", "anasayfa", "ev",
        ],
    },
    TranslationGroup {
        canonical: "search",
        variants: &[
            "search", "find",
            "buscar", "busqueda", "encontrar",
            "cerca", "ricerca", "trova",
            "recherche", "rechercher", "trouver",
            "suche", "suchen", "finden",
            "busca", "buscar", "procurar",
            "szukaj", "wyszukiwanie",
            "ara", "arama", "bul",
        ],
    },
    TranslationGroup {
        canonical: "cart",
        variants: &[
            "cart", "basket", "shopping-cart",
            "carrito", "cesta", "canasta",
            "carrello", "cestino",
            "panier", "chariot",
            "warenkorb", "einkaufswagen",
            "carrinho", "cesta",
            "koszyk",
            "sepet", "alisveris-sepeti",
        ],
    },
    TranslationGroup {
        canonical: "checkout",
        variants: &[
            "checkout", "payment", "pay",
            "pagar", "pago", "finalizar-compra",
            "checkout", "pagamento", "paga",
            "paiement", "payer", "commander",
            "kasse", "bezahlen", "zahlung",
            "pagamento", "pagar", "finalizar",
            "kasa", "platnosc",
            "odeme", "odemeyap",
        ],
    },
];

static SHARED: Lazy<Arc<Dictionary>> = Lazy::new(|| Arc::new(Dictionary::builtin()));

/// Lowercases, drops `-` and `_`, and strips a plural `s` from words longer
/// than three characters.
pub fn normalize_for_matching(segment: &str) -> String {
    let mut normalized: String = segment
        .to_lowercase()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect();

    if normalized.len() > 3 && normalized.ends_with('s') {
        normalized.pop();
    }

    normalized
}

/// Reverse index from normalized variant to normalized canonical name.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    index: HashMap<String, String>,
}

impl Dictionary {
    pub fn from_groups(groups: &[TranslationGroup]) -> Self {
        let mut index = HashMap::new();

        for group in groups {
            let canonical = normalize_for_matching(group.canonical);
            for variant in group.variants {
                index.insert(normalize_for_matching(variant), canonical.clone());
            }
        }

        Self { index }
    }

    pub fn builtin() -> Self {
        Self::from_groups(COMMON_TRANSLATIONS)
    }

    /// Process-wide built-in dictionary, built on first use.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Canonical name for an already-normalized variant.
    pub fn lookup(&self, normalized: &str) -> Option<&str> {
        self.index.get(normalized).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Compares path segments across languages using a [`Dictionary`].
#[derive(Debug, Clone)]
pub struct TranslationMatcher {
    dictionary: Arc<Dictionary>,
}

impl Default for TranslationMatcher {
    fn default() -> Self {
        Self::new(Dictionary::shared())
    }
}

impl TranslationMatcher {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { dictionary }
    }

    /// True when both segments normalize to the same string or belong to
    /// the same concept.
    pub fn are_translations(&self, first: &str, second: &str) -> bool {
        let first = normalize_for_matching(first);
        let second = normalize_for_matching(second);

        if first == second {
            return true;
        }

        match (self.dictionary.lookup(&first), self.dictionary.lookup(&second)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Canonical name for a known word; unknown words come back exactly as
    /// given, without normalization.
    pub fn canonical<'a>(&'a self, segment: &'a str) -> &'a str {
        match self.dictionary.lookup(&normalize_for_matching(segment)) {
            Some(canonical) => {
                trace!("Segment '{}' canonicalized to '{}'", segment, canonical);
                canonical
            }
            None => segment,
        }
    }
}
