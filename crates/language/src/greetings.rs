//! Localized welcome messages.

use crate::types::Language;

const ENGLISH: &str = "🌱🌾 Welcome to AgriGenius !! 🌾🌱 Hi there! I'm AgriGenius, your virtual assistant for Agriculture. How can I assist you today?";

/// Greeting for a language tag. Tags without a greeting get the English one.
pub fn greeting_for(tag: &str) -> &'static str {
    match Language::from_code(tag) {
        Some(lang) => greeting(lang),
        None => ENGLISH,
    }
}

/// Greeting for a supported language.
pub fn greeting(lang: Language) -> &'static str {
    match lang {
        Language::Hindi => "🌱🌾 AgriGenius में आपका स्वागत है !! 🌾🌱 नमस्ते! मैं AgriGenius हूं, कृषि के लिए आपका वर्चुअल असिस्टेंट। आज मैं आपकी कैसे सहायता कर सकता हूं?",
        Language::Spanish => "🌱🌾 ¡¡Bienvenido a AgriGenius!! 🌾🌱 ¡Hola! Soy AgriGenius, tu asistente virtual para la agricultura. ¿Cómo puedo ayudarte hoy?",
        Language::French => "🌱🌾 Bienvenue chez AgriGenius !! 🌾🌱 Salut! Je suis AgriGenius, votre assistant virtuel pour l'agriculture. Comment puis-je vous aider aujourd'hui?",
        Language::German => "🌱🌾 Willkommen bei AgriGenius !! 🌾🌱 Hallo! Ich bin AgriGenius, Ihr virtueller Assistent für die Landwirtschaft. Wie kann ich Ihnen heute helfen?",
        Language::Arabic => "🌱🌾 مرحبا بكم في AgriGenius !! 🌾🌱 مرحبا! أنا AgriGenius، مساعدك الافتراضي للزراعة. كيف يمكنني مساعدتك اليوم؟",
        Language::Chinese => "🌱🌾 欢迎来到AgriGenius !! 🌾🌱 您好！我是AgriGenius，您的农业虚拟助手。今天我能为您提供什么帮助？",
        Language::Japanese => "🌱🌾 AgriGeniusへようこそ !! 🌾🌱 こんにちは！私はAgriGenius、あなたの農業バーチャルアシスタントです。今日はどのようにお手伝いできますか？",
        _ => ENGLISH,
    }
}
