// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Household profiles and spending categories written on first start.

/// (name, display name)
pub const PROFILES: &[(&str, &str)] = &[
    ("dad", "Dad"),
    ("mom", "Mom"),
    ("chaithu", "Chaithu"),
    ("harshith", "Harshith"),
    ("common", "Common"),
];

/// (name, Telugu name, icon)
pub const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Rice", "బియ్యం", "🍚"),
    ("Dal", "పప్పు", "🫘"),
    ("Oil", "నూనె", "🛢️"),
    ("Vegetables", "కూరగాయలు", "🥬"),
    ("Fruits", "పండ్లు", "🍎"),
    ("Dairy", "పాల ఉత్పత్తులు", "🥛"),
    ("Snacks", "స్నాక్స్", "🍿"),
    ("Cleaning", "శుభ్రపరచడం", "🧹"),
    ("Toiletries", "సౌందర్య వస్తువులు", "🧴"),
    ("Electricity", "విద్యుత్", "⚡"),
    ("Water", "నీరు", "💧"),
    ("Gas", "గ్యాస్", "🔥"),
    ("Rent/EMI", "అద్దె/EMI", "🏠"),
    ("Fuel", "ఇంధనం", "⛽"),
    ("Auto", "ఆటో", "🛺"),
    ("Bus", "బస్సు", "🚌"),
    ("Medical", "వైద్యం", "💊"),
    ("Education", "విద్య", "📚"),
    ("Movies", "సినిమాలు", "🎬"),
    ("Dining Out", "బయట భోజనం", "🍽️"),
    ("Clothing", "బట్టలు", "👕"),
    ("Electronics", "ఎలక్ట్రానిక్స్", "📱"),
    ("Gifts", "బహుమతులు", "🎁"),
    ("Maintenance", "నిర్వహణ", "🔧"),
    ("Subscriptions", "చందాలు", "📺"),
    ("Office", "కార్యాలయం", "💼"),
    ("Travel", "ప్రయాణం", "✈️"),
    ("Pets", "పెంపుడు జంతువులు", "🐕"),
    ("Repairs", "మరమ్మతులు", "🔨"),
    ("Savings", "పొదుపు", "💰"),
    ("Miscellaneous", "ఇతరములు", "📦"),
    ("Personal Care", "వ్యక్తిగత సంరక్షణ", "💅"),
];
