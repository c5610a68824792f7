use super::{KinematicDirection, ParamEvolution, ParamHardening, ParamSection, ParamYieldSurface};

/// Holds samples of yield surface and section parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns a unit Orbison surface
    pub fn orbison() -> ParamYieldSurface {
        ParamYieldSurface::Orbison { cap_x: 1.0, cap_y: 1.0 }
    }

    /// Returns a unit Attalla surface with the default coefficients
    pub fn attalla() -> ParamYieldSurface {
        ParamYieldSurface::attalla(1.0, 1.0)
    }

    /// Returns an El-Tawil surface of a composite column (kN, kN·m)
    pub fn el_tawil() -> ParamYieldSurface {
        ParamYieldSurface::el_tawil(
            400.0,   // x_bal
            2000.0,  // y_bal
            6000.0,  // y_pos
            -2500.0, // y_neg
            1.6,     // cz
            1.9,     // ty
        )
    }

    /// Returns an unsymmetric El-Tawil surface of a composite column (kN, kN·m)
    pub fn el_tawil_unsym() -> ParamYieldSurface {
        ParamYieldSurface::ElTawilUnsym {
            x_pos_bal: 400.0,
            y_pos_bal: 2000.0,
            x_neg_bal: -300.0,
            y_neg_bal: 1500.0,
            y_pos: 6000.0,
            y_neg: -2500.0,
            cz_pos: 1.6,
            ty_pos: 1.9,
            cz_neg: 1.5,
            ty_neg: 2.0,
            cap: 0.95,
        }
    }

    /// Returns a Hajjar surface of a 10 in × 10 in × 3/8 in concrete-filled tube (kip, in)
    pub fn hajjar() -> ParamYieldSurface {
        ParamYieldSurface::Hajjar {
            depth: 10.0,
            width: 10.0,
            thickness: 0.375,
            fc: 5.0,
            fy: 50.0,
        }
    }

    /// Returns all sample surfaces (except Null) with their names
    pub fn all_surfaces() -> Vec<(&'static str, ParamYieldSurface)> {
        vec![
            ("Attalla", SampleParams::attalla()),
            ("Orbison", SampleParams::orbison()),
            ("ElTawil", SampleParams::el_tawil()),
            ("ElTawilUnsym", SampleParams::el_tawil_unsym()),
            ("Hajjar", SampleParams::hajjar()),
        ]
    }

    /// Returns a section with a unit Orbison surface and a frozen evolution
    pub fn section_orbison() -> ParamSection {
        ParamSection {
            ea: 100.0,
            ei: 50.0,
            surface: SampleParams::orbison(),
            evolution: ParamEvolution::Null,
        }
    }

    /// Returns a section with a unit Orbison surface and linear isotropic hardening
    pub fn section_orbison_isotropic(kp: f64) -> ParamSection {
        ParamSection {
            ea: 100.0,
            ei: 50.0,
            surface: SampleParams::orbison(),
            evolution: ParamEvolution::Isotropic {
                hardening: ParamHardening::Linear { kp },
            },
        }
    }

    /// Returns a section with a unit Orbison surface and linear kinematic hardening
    pub fn section_orbison_kinematic(kp: f64) -> ParamSection {
        ParamSection {
            ea: 100.0,
            ei: 50.0,
            surface: SampleParams::orbison(),
            evolution: ParamEvolution::Kinematic {
                hardening: ParamHardening::Linear { kp },
                direction: KinematicDirection::Normal,
            },
        }
    }

    /// Returns a composite section with an El-Tawil surface and combined hardening
    pub fn section_el_tawil() -> ParamSection {
        ParamSection {
            ea: 5.0e6,
            ei: 1.0e5,
            surface: SampleParams::el_tawil(),
            evolution: ParamEvolution::Combined {
                isotropic: ParamHardening::ExponReducing { kp0: 2.0, alpha: 50.0 },
                kinematic: ParamHardening::Linear { kp: 0.5 },
                iso_ratio: 0.5,
                direction: KinematicDirection::Normal,
            },
        }
    }
}
