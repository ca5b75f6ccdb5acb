//! Static reference lists.

pub const EYE_DISEASES: &[&str] = &[
    // Common
    "Cataract",
    "Glaucoma",
    "Diabetic Retinopathy",
    "Macular Degeneration",
    "Dry Eye Syndrome",
    "Uveitis",
    "Retinal Detachment",
    "Corneal Dystrophy",
    "Pterygium",
    "Chalazion",
    "Stye",
    "Conjunctivitis",
    "Keratitis",
    "Floaters",
    // Uncommon
    "Fuchs' Dystrophy",
    "Keratoconus",
    "Retinitis Pigmentosa",
    "Stargardt Disease",
    "Leber Hereditary Optic Neuropathy",
    "Charles Bonnet Syndrome",
    "Ocular Hypertension",
    "Anisocoria",
];

pub const EYE_SURGERIES: &[&str] = &[
    "Cataract Surgery",
    "LASIK",
    "PRK (Photorefractive Keratectomy)",
    "Vitrectomy",
    "Glaucoma Surgery",
    "Corneal Transplant",
    "Retinal Detachment Repair",
    "Eyelid Surgery (Blepharoplasty)",
    "Pterygium Removal",
    "Chalazion Removal",
    "Trabeculectomy",
    "Tube Shunt Surgery",
    "Scleral Buckle",
    "Macular Hole Repair",
];

pub const EYE_LASERS: &[&str] = &[
    "YAG Capsulotomy",
    "Selective Laser Trabeculoplasty (SLT)",
    "Laser Peripheral Iridotomy (LPI)",
    "Panretinal Photocoagulation (PRP)",
    "Focal Laser Photocoagulation",
    "Retinal Tear Laser Repair",
    "Argon Laser Trabeculoplasty (ALT)",
    "Photodynamic Therapy (PDT)",
];

pub const EYE_INJURIES: &[&str] = &[
    "Corneal Abrasion",
    "Foreign Body in Eye",
    "Chemical Burn",
    "Blunt Trauma",
    "Penetrating Injury",
    "Orbital Fracture",
    "Hyphema",
    "Traumatic Iritis",
    "UV Burn (Welder's Flash)",
];

/// Eye drops; also the suggestion list for prescribed eye medications.
pub const EYE_DROPS: &[&str] = &[
    "Artificial Tears",
    "Timolol",
    "Latanoprost (Xalatan)",
    "Dorzolamide (Trusopt)",
    "Brimonidine (Alphagan)",
    "Bimatoprost (Lumigan)",
    "Travoprost (Travatan)",
    "Cyclopentolate",
    "Tropicamide",
    "Prednisolone Acetate",
    "Tobramycin",
    "Moxifloxacin (Vigamox)",
    "Ofloxacin",
    "Gentamicin",
    "Refresh Tears",
    "Systane",
    "TheraTears",
];

pub const MEDICAL_CONDITIONS: &[&str] = &[
    // Common
    "Diabetes Type 1",
    "Diabetes Type 2",
    "Hypertension",
    "Sleep Apnea",
    "Stroke",
    "Cancer",
    "Prostate Issues",
    "Malignant Hyperthermia",
    "Heart Disease",
    "High Cholesterol",
    "Arthritis",
    "Osteoporosis",
    // Uncommon
    "Autoimmune Disorders",
    "Rheumatoid Arthritis",
    "Lupus",
    "Multiple Sclerosis",
    "Thyroid Disease",
    "Hyperthyroidism",
    "Hypothyroidism",
    "Renal Disease",
    "Kidney Disease",
    "Liver Disease",
    "COPD",
    "Asthma",
    "Migraine",
    "Epilepsy",
    "Depression",
    "Anxiety",
];

pub const REGULAR_MEDICATIONS: &[&str] = &[
    "Acetaminophen (Tylenol)",
    "Ibuprofen (Advil)",
    "ASA (Aspirin)",
    "Metformin",
    "Lisinopril",
    "Amlodipine",
    "Atorvastatin (Lipitor)",
    "Metoprolol",
    "Omeprazole",
    "Levothyroxine",
    "Warfarin",
    "Clopidogrel (Plavix)",
    "Ramipril",
    "Hydrochlorothiazide",
    "Simvastatin",
    "Pantoprazole",
    "Rosuvastatin (Crestor)",
    "Losartan",
    "Gabapentin",
    "Amoxicillin",
    "Azithromycin",
    "Ciprofloxacin",
    "Prednisone",
    "Insulin",
    "Vitamin D",
    "Vitamin B12",
    "Iron Supplements",
    "Calcium Supplements",
];

pub const SPECIALISTS: &[&str] = &[
    "Endocrinologist",
    "Neurologist",
    "Cardiologist",
    "Rheumatologist",
    "Oncologist",
    "Dermatologist",
    "Orthopedist",
    "Psychiatrist",
    "Pulmonologist",
    "Gastroenterologist",
    "Nephrologist",
    "Urologist",
    "Otolaryngologist (ENT)",
    "Hematologist",
    "Infectious Disease Specialist",
];

pub const DRUG_ALLERGIES: &[&str] = &[
    "Penicillin",
    "Sulfa Drugs",
    "Codeine",
    "Morphine",
    "ASA (Aspirin)",
    "Ibuprofen",
    "Latex",
    "Iodine",
    "Contrast Dye",
    "Amoxicillin",
    "Erythromycin",
    "Tetracycline",
];

pub const OPTOMETRISTS: &[&str] = &[
    "Dr. Sarah Johnson",
    "Dr. Michael Chen",
    "Dr. Emily Rodriguez",
    "Dr. David Thompson",
    "Dr. Jennifer Lee",
    "Dr. Robert Miller",
    "Dr. Lisa Wong",
    "Dr. James Wilson",
    "Dr. Amanda Taylor",
    "Dr. Christopher Brown",
];

pub const FAMILY_DOCTORS: &[&str] = &[
    "Dr. Patricia Smith",
    "Dr. Mark Davis",
    "Dr. Jessica Anderson",
    "Dr. Kevin Liu",
    "Dr. Rachel Green",
    "Dr. Andrew Martinez",
    "Dr. Stephanie Kim",
    "Dr. Thomas White",
    "Dr. Michelle Garcia",
    "Dr. Daniel Singh",
];
