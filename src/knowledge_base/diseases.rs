//! Embedded disease guide
//!
//! Curated disease/crop metadata compiled into the binary. Row order is the
//! knowledge base iteration order and therefore decides alias collisions
//! ("potato_blight", "fungal_spot") and first-hit fuzzy matches.

/// A single row of the embedded disease guide
#[derive(Debug, Clone, Copy)]
pub(crate) struct DiseaseRow {
    pub key: &'static str,
    pub crop_name: &'static str,
    pub crop_scientific_name: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    pub prevention: &'static [&'static str],
    pub control: &'static [&'static str],
}

// ============================================================================
// EMBEDDED DISEASE GUIDE
// ============================================================================

pub(crate) static DISEASE_ROWS: &[DiseaseRow] = &[
    DiseaseRow {
        key: "corn_leaf_blight",
        crop_name: "Maize (Corn)",
        crop_scientific_name: "Zea mays",
        description: "A fungal disease that causes elongated lesions on maize leaves, reducing photosynthesis.",
        aliases: &["corn_blight", "maize_blight", "leaf_blight", "corn", "maize", "blight"],
        prevention: &[
            "Rotate crops with non-host plants",
            "Use resistant maize varieties",
            "Remove infected crop residues",
        ],
        control: &[
            "Apply fungicides such as mancozeb or azoxystrobin",
            "Improve field drainage to reduce humidity",
        ],
    },
    DiseaseRow {
        key: "maize_rust",
        crop_name: "Maize (Corn)",
        crop_scientific_name: "Zea mays",
        description: "A fungal disease producing reddish-brown pustules on maize leaves.",
        aliases: &["corn_rust", "wheat_rust_like"],
        prevention: &["Plant resistant maize varieties", "Avoid overcrowding crops"],
        control: &[
            "Spray fungicides like triazoles (tebuconazole, propiconazole)",
            "Monitor and remove heavily infected plants",
        ],
    },
    DiseaseRow {
        key: "tomato_early_blight",
        crop_name: "Tomato",
        crop_scientific_name: "Solanum lycopersicum",
        description: "A common tomato disease causing concentric dark spots on leaves and fruit rot.",
        aliases: &["tomato_blight", "early_blight"],
        prevention: &[
            "Use disease-free seeds",
            "Practice crop rotation",
            "Mulch to prevent soil splash",
        ],
        control: &["Spray copper-based fungicides", "Remove and destroy infected plants"],
    },
    DiseaseRow {
        key: "tomato_late_blight",
        crop_name: "Tomato",
        crop_scientific_name: "Solanum lycopersicum",
        description: "A devastating tomato and potato disease with water-soaked lesions that spread rapidly.",
        aliases: &["late_blight", "potato_blight", "tomato_rot"],
        prevention: &["Plant resistant varieties", "Ensure good field ventilation"],
        control: &[
            "Apply fungicides like chlorothalonil or metalaxyl",
            "Remove infected plants immediately",
        ],
    },
    DiseaseRow {
        key: "wheat_rust",
        crop_name: "Wheat",
        crop_scientific_name: "Triticum aestivum",
        description: "A fungal disease causing reddish-brown or yellow pustules on wheat leaves and stems.",
        aliases: &["wheat_leaf_rust", "stem_rust", "stripe_rust"],
        prevention: &[
            "Plant resistant wheat varieties",
            "Practice crop rotation",
            "Clean agricultural tools",
        ],
        control: &[
            "Apply triadimefon or tebuconazole fungicides",
            "Remove heavily infected plants",
        ],
    },
    DiseaseRow {
        key: "rice_leaf_blast",
        crop_name: "Rice",
        crop_scientific_name: "Oryza sativa",
        description: "A destructive fungal disease causing diamond-shaped lesions on rice leaves.",
        aliases: &["rice_blast", "leaf_blast"],
        prevention: &[
            "Use resistant rice varieties",
            "Maintain proper water management",
            "Avoid excessive nitrogen fertilizer",
        ],
        control: &["Apply triazole fungicides", "Remove infected plants immediately"],
    },
    DiseaseRow {
        key: "cassava_mosaic",
        crop_name: "Cassava",
        crop_scientific_name: "Manihot esculenta",
        description: "A viral disease causing yellowing and mosaic patterns on cassava leaves.",
        aliases: &["cassava_leaf_mosaic", "mosaic", "cassava_disease"],
        prevention: &[
            "Use virus-free cuttings",
            "Control whitefly vectors",
            "Practice crop rotation",
        ],
        control: &["Remove and destroy infected plants", "Use resistant cassava varieties"],
    },
    DiseaseRow {
        key: "banana_sigatoka",
        crop_name: "Banana",
        crop_scientific_name: "Musa spp.",
        description: "A fungal leaf spot disease causing dark streaks and lesions on banana leaves.",
        aliases: &["sigatoka", "banana_leaf_spot", "black_sigatoka"],
        prevention: &[
            "Use disease-free planting material",
            "Practice good field sanitation",
            "Avoid overhead irrigation",
        ],
        control: &["Apply mancozeb or chlorothalonil fungicides", "Remove affected leaves"],
    },
    DiseaseRow {
        key: "powdery_mildew",
        crop_name: "Legumes/Vegetables",
        crop_scientific_name: "Various",
        description: "A fungal disease causing white powdery coating on leaves and stems.",
        aliases: &["mildew", "white_mold", "powdery_mildew_fungal"],
        prevention: &[
            "Ensure good air circulation",
            "Avoid overcrowding",
            "Use resistant varieties",
        ],
        control: &["Spray sulfur-based fungicides", "Apply neem oil"],
    },
    DiseaseRow {
        key: "downy_mildew",
        crop_name: "Vegetables/Crops",
        crop_scientific_name: "Various",
        description: "A fungal disease causing yellow lesions with gray mold on leaf undersides.",
        aliases: &["downy_fungal", "mold", "gray_mold"],
        prevention: &[
            "Improve field drainage",
            "Increase air circulation",
            "Use disease-resistant varieties",
        ],
        control: &["Apply metalaxyl or mancozeb fungicides", "Remove infected leaves"],
    },
    DiseaseRow {
        key: "bean_rust",
        crop_name: "Bean",
        crop_scientific_name: "Phaseolus vulgaris",
        description: "A fungal disease producing rust-colored pustules on bean leaves and pods.",
        aliases: &["rust", "bean_disease"],
        prevention: &[
            "Plant resistant bean varieties",
            "Ensure good air circulation",
            "Remove plant debris",
        ],
        control: &["Apply sulfur or copper fungicides", "Remove heavily infected plants"],
    },
    DiseaseRow {
        key: "common_bean_blight",
        crop_name: "Bean",
        crop_scientific_name: "Phaseolus vulgaris",
        description: "A bacterial disease causing angular brown lesions on bean leaves.",
        aliases: &["bean_blight", "bacterial_blight"],
        prevention: &["Use disease-free seeds", "Rotate crops", "Avoid working in wet fields"],
        control: &["Remove infected plants", "Use resistant varieties"],
    },
    DiseaseRow {
        key: "potato_late_blight",
        crop_name: "Potato",
        crop_scientific_name: "Solanum tuberosum",
        description: "A serious fungal disease causing water-soaked lesions on potato leaves and tubers.",
        aliases: &["potato_blight"],
        prevention: &[
            "Use certified seed potatoes",
            "Ensure good soil drainage",
            "Avoid overhead irrigation",
        ],
        control: &[
            "Apply fungicides like metalaxyl or mancozeb",
            "Remove infected plants",
            "Use resistant varieties",
        ],
    },
    DiseaseRow {
        key: "bacterial_wilt",
        crop_name: "Vegetables/Crops",
        crop_scientific_name: "Various",
        description: "A serious bacterial disease causing wilting and death of plants.",
        aliases: &["wilt", "bacterial_disease"],
        prevention: &[
            "Control insect vectors",
            "Use resistant varieties",
            "Practice crop rotation",
        ],
        control: &["Remove infected plants immediately", "Control vectors using pesticides"],
    },
    DiseaseRow {
        key: "leaf_curl",
        crop_name: "Vegetables/Crops",
        crop_scientific_name: "Various",
        description: "A viral disease causing curling and distortion of leaves.",
        aliases: &["curl", "viral_disease"],
        prevention: &[
            "Control whitefly and aphid vectors",
            "Use resistant varieties",
            "Plant early to avoid peak vector populations",
        ],
        control: &[
            "Remove infected plants",
            "Apply appropriate pesticides for vector control",
        ],
    },
    DiseaseRow {
        key: "anthracnose",
        crop_name: "Various Crops",
        crop_scientific_name: "Various",
        description: "A fungal disease causing dark, sunken lesions on leaves, stems, and fruit.",
        aliases: &["anthrax", "fungal_spot"],
        prevention: &[
            "Use disease-free seeds",
            "Improve field drainage",
            "Remove plant debris",
        ],
        control: &["Apply copper or benzimidazole fungicides", "Remove infected plants"],
    },
    DiseaseRow {
        key: "septoria_leaf_spot",
        crop_name: "Wheat/Cereals",
        crop_scientific_name: "Triticum aestivum",
        description: "A fungal disease causing circular lesions with dark borders on wheat leaves.",
        aliases: &["leaf_spot", "septoria"],
        prevention: &[
            "Use resistant wheat varieties",
            "Remove crop residues",
            "Practice crop rotation",
        ],
        control: &["Apply triazole fungicides", "Remove infected leaves"],
    },
    DiseaseRow {
        key: "fusarium_wilt",
        crop_name: "Various Crops",
        crop_scientific_name: "Various",
        description: "A soil-borne fungal disease causing wilting and discoloration of vascular tissue.",
        aliases: &["fusarium", "wilting"],
        prevention: &[
            "Use disease-free seeds and soil",
            "Rotate crops with non-susceptible plants",
            "Maintain proper drainage",
        ],
        control: &["Remove infected plants", "Solarize soil in serious cases"],
    },
    DiseaseRow {
        key: "black_spot",
        crop_name: "Various Crops",
        crop_scientific_name: "Various",
        description: "A fungal disease causing dark spots on leaves and stems.",
        aliases: &["spot", "fungal_spot"],
        prevention: &[
            "Ensure good air circulation",
            "Avoid overhead irrigation",
            "Remove infected leaves",
        ],
        control: &["Apply copper or sulfur fungicides", "Improve field sanitation"],
    },
    DiseaseRow {
        key: "white_fly_damage",
        crop_name: "Various Crops",
        crop_scientific_name: "Bemisia tabaci",
        description: "Damage caused by whitefly insects feeding on plant sap.",
        aliases: &["whitefly", "insect_damage"],
        prevention: &[
            "Use yellow sticky traps",
            "Plant resistant varieties",
            "Maintain field sanitation",
        ],
        control: &["Apply insecticidal soaps", "Use neem oil", "Release natural predators"],
    },
    DiseaseRow {
        key: "aphid_infestation",
        crop_name: "Various Crops",
        crop_scientific_name: "Aphidoidea",
        description: "Damage caused by aphid insects that suck plant sap and transmit viruses.",
        aliases: &["aphid", "pest"],
        prevention: &[
            "Use reflective mulches",
            "Encourage natural predators",
            "Monitor plants regularly",
        ],
        control: &["Spray insecticidal soaps", "Use neem oil", "Release ladybugs or lacewings"],
    },
    DiseaseRow {
        key: "mite_damage",
        crop_name: "Various Crops",
        crop_scientific_name: "Acari",
        description: "Damage caused by spider mites that cause yellowing and stippling of leaves.",
        aliases: &["mite", "spider_mite"],
        prevention: &[
            "Maintain adequate humidity",
            "Ensure good air circulation",
            "Remove affected leaves",
        ],
        control: &["Apply sulfur-based acaricides", "Use neem oil", "Release predatory mites"],
    },
    DiseaseRow {
        key: "healthy_crop",
        crop_name: "Healthy Plant",
        crop_scientific_name: "N/A",
        description: "The plant appears to be healthy with no visible signs of disease.",
        aliases: &["healthy", "normal", "good", "ok"],
        prevention: &[
            "Continue good farming practices",
            "Monitor regularly for early signs of disease",
            "Maintain proper irrigation and fertilization",
        ],
        control: &["No disease control measures needed", "Continue preventive practices"],
    },
];
