//! Crop keyword table
//!
//! Maps crop names and genus names that classifiers embed in labels
//! ("tomato_...", "zea_...") to a display crop name and scientific name.
//! Scanned in row order; the first keyword found inside a label wins, so
//! longer keywords that contain shorter ones must come first
//! ("watermelon" before "melon").

/// A single row of the embedded crop keyword table
#[derive(Debug, Clone, Copy)]
pub(crate) struct CropRow {
    pub keyword: &'static str,
    pub name: &'static str,
    pub scientific_name: &'static str,
}

pub(crate) static CROP_ROWS: &[CropRow] = &[
    CropRow { keyword: "maize", name: "Maize (Corn)", scientific_name: "Zea mays" },
    CropRow { keyword: "corn", name: "Maize (Corn)", scientific_name: "Zea mays" },
    CropRow { keyword: "zea", name: "Maize (Corn)", scientific_name: "Zea mays" },
    CropRow { keyword: "tomato", name: "Tomato", scientific_name: "Solanum lycopersicum" },
    CropRow { keyword: "solanum", name: "Tomato", scientific_name: "Solanum lycopersicum" },
    CropRow { keyword: "wheat", name: "Wheat", scientific_name: "Triticum aestivum" },
    CropRow { keyword: "triticum", name: "Wheat", scientific_name: "Triticum aestivum" },
    CropRow { keyword: "rice", name: "Rice", scientific_name: "Oryza sativa" },
    CropRow { keyword: "oryza", name: "Rice", scientific_name: "Oryza sativa" },
    CropRow { keyword: "cassava", name: "Cassava", scientific_name: "Manihot esculenta" },
    CropRow { keyword: "manihot", name: "Cassava", scientific_name: "Manihot esculenta" },
    CropRow { keyword: "banana", name: "Banana", scientific_name: "Musa spp." },
    CropRow { keyword: "plantain", name: "Banana/Plantain", scientific_name: "Musa spp." },
    CropRow { keyword: "musa", name: "Banana", scientific_name: "Musa spp." },
    CropRow { keyword: "bean", name: "Bean", scientific_name: "Phaseolus vulgaris" },
    CropRow { keyword: "phaseolus", name: "Bean", scientific_name: "Phaseolus vulgaris" },
    CropRow { keyword: "legume", name: "Legumes", scientific_name: "Fabaceae" },
    CropRow { keyword: "potato", name: "Potato", scientific_name: "Solanum tuberosum" },
    CropRow { keyword: "onion", name: "Onion", scientific_name: "Allium cepa" },
    CropRow { keyword: "cabbage", name: "Cabbage", scientific_name: "Brassica oleracea" },
    CropRow { keyword: "kale", name: "Kale", scientific_name: "Brassica oleracea var. acephala" },
    CropRow { keyword: "pepper", name: "Pepper", scientific_name: "Capsicum spp." },
    CropRow { keyword: "capsicum", name: "Pepper", scientific_name: "Capsicum spp." },
    CropRow { keyword: "carrot", name: "Carrot", scientific_name: "Daucus carota" },
    CropRow { keyword: "spinach", name: "Spinach", scientific_name: "Spinacia oleracea" },
    CropRow { keyword: "lettuce", name: "Lettuce", scientific_name: "Lactuca sativa" },
    CropRow { keyword: "pumpkin", name: "Pumpkin", scientific_name: "Cucurbita moschata" },
    CropRow { keyword: "squash", name: "Squash", scientific_name: "Cucurbita spp." },
    CropRow { keyword: "cucumber", name: "Cucumber", scientific_name: "Cucumis sativus" },
    CropRow { keyword: "watermelon", name: "Watermelon", scientific_name: "Citrullus lanatus" },
    CropRow { keyword: "melon", name: "Melon", scientific_name: "Cucumis melo" },
    CropRow { keyword: "sorghum", name: "Sorghum", scientific_name: "Sorghum bicolor" },
    CropRow { keyword: "millet", name: "Millet", scientific_name: "Pennisetum glaucum" },
    CropRow { keyword: "sugarcane", name: "Sugarcane", scientific_name: "Saccharum officinarum" },
    CropRow { keyword: "coconut", name: "Coconut", scientific_name: "Cocos nucifera" },
];
