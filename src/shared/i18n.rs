//! UI translation table (English, Amharic, Tigrinya).
//!
//! Lookups fall back to the key itself, so untranslated labels still render.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Am,
    Ti,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Am, Language::Ti];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Am => "am",
            Language::Ti => "ti",
        }
    }

    /// Native name shown in the language picker.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Am => "አማርኛ",
            Language::Ti => "ትግርኛ",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Am => AM,
            Language::Ti => TI,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "am" => Ok(Language::Am),
            "ti" => Ok(Language::Ti),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// Look up `key` for `lang`, returning the key when no entry exists.
pub fn translate<'a>(lang: Language, key: &'a str) -> &'a str {
    lang.table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(key)
}

const EN: &[(&str, &str)] = &[
    ("dashboard", "Dashboard"),
    ("patients", "Patients"),
    ("doctors", "Doctors"),
    ("appointments", "Appointments"),
    ("billing", "Billing"),
    ("aiAssistant", "AI Assistant"),
    ("settings", "Settings"),
    ("logout", "Logout"),
    ("hospitalOs", "Hospital OS"),
    ("welcomeBack", "Welcome Back"),
    ("signInSubtitle", "Sign in to access your dashboard"),
    ("email", "Email Address"),
    ("password", "Password"),
    ("signIn", "Sign In"),
    ("demoCredentials", "Demo Credentials"),
    ("overview", "Hospital Overview"),
    ("welcomeUser", "Welcome back"),
    ("totalPatients", "Total Patients"),
    ("surgeries", "Surgeries"),
    ("earnings", "Earnings"),
    ("recentUpdates", "Recent Updates"),
    ("departmentActivity", "Department Activity"),
    ("patientFlow", "Patient Flow Statistics"),
];

const AM: &[(&str, &str)] = &[
    ("dashboard", "ዳሽቦርድ"),
    ("patients", "ታካሚዎች"),
    ("doctors", "ዶክተሮች"),
    ("appointments", "ቀጠሮዎች"),
    ("billing", "ክፍያ"),
    ("aiAssistant", "AI ረዳት"),
    ("settings", "መቼቶች"),
    ("logout", "ውጣ"),
    ("hospitalOs", "ሆስፒታል OS"),
    ("welcomeBack", "እንኳን ደህና መጡ"),
    ("signInSubtitle", "ወደ ዳሽቦርድ ለመግባት ይግቡ"),
    ("email", "ኢሜይል"),
    ("password", "የይለፍ ቃል"),
    ("signIn", "ግባ"),
    ("demoCredentials", "የሙከራ መለያዎች"),
    ("overview", "የሆስፒታል አጠቃላይ እይታ"),
    ("welcomeUser", "እንኳን ደህና መጡ"),
    ("totalPatients", "ጠቅላላ ታካሚዎች"),
    ("surgeries", "ቀዶ ጥገናዎች"),
    ("earnings", "ገቢ"),
    ("recentUpdates", "የቅርብ ጊዜ ዝመናዎች"),
    ("departmentActivity", "የክፍል እንቅስቃሴ"),
    ("patientFlow", "የታካሚ ፍሰት ስታቲስቲክስ"),
];

const TI: &[(&str, &str)] = &[
    ("dashboard", "ዳሽቦርድ"),
    ("patients", "ሕሙማት"),
    ("doctors", "ሓካይም"),
    ("appointments", "ቆጸራታት"),
    ("billing", "ክፍሊት"),
    ("aiAssistant", "AI ሓጋዚ"),
    ("settings", "ቅጥዕታት"),
    ("logout", "ውጻእ"),
    ("hospitalOs", "ሆስፒታል OS"),
    ("welcomeBack", "እንቋዕ ብደሓን መጻእኩም"),
    ("signInSubtitle", "ናብ ዳሽቦርድኩም ንምእታው ይእተዉ"),
    ("email", "ኢሜይል"),
    ("password", "መሕለፊ ቃል"),
    ("signIn", "እተው"),
    ("demoCredentials", "ናይ ፈተነ መለለይ"),
    ("overview", "ሓፈሻዊ ሆስፒታል"),
    ("welcomeUser", "እንቋዕ ብደሓን መጻእኩም"),
    ("totalPatients", "ጠቕላላ ሕሙማት"),
    ("surgeries", "ቀዶ ሕክምና"),
    ("earnings", "አታዊ"),
    ("recentUpdates", "ናይ ቀረባ እዋን ሓበሬታ"),
    ("departmentActivity", "ንጥፈታት ክፍሊ"),
    ("patientFlow", "ስታቲስቲክስ ፍሰት ሕሙማት"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_keys() {
        assert_eq!(translate(Language::En, "billing"), "Billing");
        assert_eq!(translate(Language::Am, "billing"), "ክፍያ");
        assert_eq!(translate(Language::Ti, "doctors"), "ሓካይም");
    }

    #[test]
    fn test_missing_key_falls_back() {
        assert_eq!(translate(Language::Ti, "noSuchKey"), "noSuchKey");
    }

    #[test]
    fn test_tables_cover_same_keys() {
        for lang in [Language::Am, Language::Ti] {
            assert_eq!(lang.table().len(), EN.len());
            for (key, _) in EN {
                assert_ne!(translate(lang, key), *key, "{} missing {}", lang.code(), key);
            }
        }
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("AM".parse::<Language>().unwrap(), Language::Am);
        assert!("fr".parse::<Language>().is_err());
    }
}
