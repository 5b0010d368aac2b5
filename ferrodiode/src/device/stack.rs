//! The layered device geometry
//!
//! A `LayerStack` is produced once by `LayerStackBuilder` (or the `standard_structure`
//! shortcut) and is read-only afterwards. Layers are ordered along the device axis, from the
//! bottom electrode at the origin to the top electrode at the total active thickness.

use super::{Material, MaterialInfoDesk};
use crate::constants::NANOMETRE;
use crate::error::{ensure_positive, to_f64, ConfigurationError, LookupError};
use ferrodiode_mesher::{create_line_segment_mesh_1d_from_regions, Mesh1d};
use nalgebra::{DVector, RealField, Vector1};
use std::ops::Range;

/// The function of a layer in the diode
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerRole {
    /// A metal contact, idealised with zero thickness
    Electrode,
    /// The degraded interfacial region of the ferroelectric next to the bottom electrode
    DeadLayer,
    /// The switchable ferroelectric film
    Ferroelectric,
    /// The non-polar insulating layer below the top electrode
    Oxide,
}

impl std::fmt::Display for LayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LayerRole::Electrode => write!(f, "electrode"),
            LayerRole::DeadLayer => write!(f, "dead layer"),
            LayerRole::Ferroelectric => write!(f, "ferroelectric"),
            LayerRole::Oxide => write!(f, "oxide"),
        }
    }
}

/// A single layer of the stack
#[derive(Debug, Clone, PartialEq)]
pub struct Layer<T> {
    name: &'static str,
    material: Material<T>,
    thickness: T,
    role: LayerRole,
    interval: Range<T>,
}

impl<T: Copy + RealField> Layer<T> {
    /// Human readable name, such as "Bottom Electrode"
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The material the layer is made of
    pub fn material(&self) -> &Material<T> {
        &self.material
    }

    /// Thickness in m
    pub fn thickness(&self) -> T {
        self.thickness
    }

    /// The role the layer plays in the device
    pub fn role(&self) -> LayerRole {
        self.role
    }

    /// The half-open position interval `[start, end)` occupied by the layer, in m
    pub fn interval(&self) -> Range<T> {
        self.interval.clone()
    }

    /// Position of the lower interface in m
    pub fn start(&self) -> T {
        self.interval.start
    }

    /// Position of the upper interface in m
    pub fn end(&self) -> T {
        self.interval.end
    }

    /// Whether the layer occupies space in the active region
    pub fn is_active(&self) -> bool {
        self.role != LayerRole::Electrode && self.thickness > T::zero()
    }

    /// Whether `position` lies in the half-open interval of the layer
    pub fn contains(&self, position: T) -> bool {
        self.interval.start <= position && position < self.interval.end
    }
}

/// The parameters of the five layer metal / dead layer / ferroelectric / oxide / metal diode
///
/// Thicknesses are in m. A zero dead layer or oxide thickness makes that layer inactive, it is
/// kept in the stack so its material still defines the interface barrier.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardStructure<T> {
    /// Bottom electrode material
    pub bottom_electrode: String,
    /// Top electrode material
    pub top_electrode: String,
    /// Ferroelectric material, shared with the dead layer
    pub ferroelectric: String,
    /// Ferroelectric thickness in m
    pub ferroelectric_thickness: T,
    /// Dead layer thickness in m
    pub dead_layer_thickness: T,
    /// Oxide material
    pub oxide: String,
    /// Oxide thickness in m
    pub oxide_thickness: T,
}

impl<T: RealField> Default for StandardStructure<T> {
    fn default() -> Self {
        Self {
            bottom_electrode: "Ti".into(),
            top_electrode: "Au".into(),
            ferroelectric: "HfO2".into(),
            ferroelectric_thickness: nalgebra::convert(10. * NANOMETRE),
            dead_layer_thickness: nalgebra::convert(NANOMETRE),
            oxide: "Al2O3".into(),
            oxide_thickness: nalgebra::convert(2. * NANOMETRE),
        }
    }
}

/// Builder for a `LayerStack`
///
/// `build` only becomes available once an info desk, both electrodes and the ferroelectric have
/// been attached. The dead layer defaults to zero thickness and the oxide to absent.
pub struct LayerStackBuilder<T, RefInfoDesk, BottomElectrode, TopElectrode, Ferroelectric> {
    info_desk: RefInfoDesk,
    bottom_electrode: BottomElectrode,
    top_electrode: TopElectrode,
    ferroelectric: Ferroelectric,
    dead_layer_thickness: Option<T>,
    oxide: Option<(String, T)>,
}

impl<T> Default for LayerStackBuilder<T, (), (), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LayerStackBuilder<T, (), (), (), ()> {
    /// Initialise an empty LayerStackBuilder
    pub fn new() -> Self {
        Self {
            info_desk: (),
            bottom_electrode: (),
            top_electrode: (),
            ferroelectric: (),
            dead_layer_thickness: None,
            oxide: None,
        }
    }
}

impl<T, RefInfoDesk, BottomElectrode, TopElectrode, Ferroelectric>
    LayerStackBuilder<T, RefInfoDesk, BottomElectrode, TopElectrode, Ferroelectric>
{
    /// Attach the info desk materials are resolved against
    pub fn with_info_desk<InfoDesk>(
        self,
        info_desk: &InfoDesk,
    ) -> LayerStackBuilder<T, &InfoDesk, BottomElectrode, TopElectrode, Ferroelectric> {
        LayerStackBuilder {
            info_desk,
            bottom_electrode: self.bottom_electrode,
            top_electrode: self.top_electrode,
            ferroelectric: self.ferroelectric,
            dead_layer_thickness: self.dead_layer_thickness,
            oxide: self.oxide,
        }
    }

    /// Attach the bottom electrode material
    pub fn with_bottom_electrode(
        self,
        material: &str,
    ) -> LayerStackBuilder<T, RefInfoDesk, String, TopElectrode, Ferroelectric> {
        LayerStackBuilder {
            info_desk: self.info_desk,
            bottom_electrode: material.to_string(),
            top_electrode: self.top_electrode,
            ferroelectric: self.ferroelectric,
            dead_layer_thickness: self.dead_layer_thickness,
            oxide: self.oxide,
        }
    }

    /// Attach the top electrode material
    pub fn with_top_electrode(
        self,
        material: &str,
    ) -> LayerStackBuilder<T, RefInfoDesk, BottomElectrode, String, Ferroelectric> {
        LayerStackBuilder {
            info_desk: self.info_desk,
            bottom_electrode: self.bottom_electrode,
            top_electrode: material.to_string(),
            ferroelectric: self.ferroelectric,
            dead_layer_thickness: self.dead_layer_thickness,
            oxide: self.oxide,
        }
    }

    /// Attach the ferroelectric material and its thickness in m
    pub fn with_ferroelectric(
        self,
        material: &str,
        thickness: T,
    ) -> LayerStackBuilder<T, RefInfoDesk, BottomElectrode, TopElectrode, (String, T)> {
        LayerStackBuilder {
            info_desk: self.info_desk,
            bottom_electrode: self.bottom_electrode,
            top_electrode: self.top_electrode,
            ferroelectric: (material.to_string(), thickness),
            dead_layer_thickness: self.dead_layer_thickness,
            oxide: self.oxide,
        }
    }

    /// Set the dead layer thickness in m
    pub fn with_dead_layer(self, thickness: T) -> Self {
        Self {
            dead_layer_thickness: Some(thickness),
            ..self
        }
    }

    /// Attach an oxide layer of the given material and thickness in m
    pub fn with_oxide(self, material: &str, thickness: T) -> Self {
        Self {
            oxide: Some((material.to_string(), thickness)),
            ..self
        }
    }
}

impl<'a, T, InfoDesk> LayerStackBuilder<T, &'a InfoDesk, String, String, (String, T)>
where
    T: Copy + RealField,
    InfoDesk: MaterialInfoDesk<T>,
{
    /// Resolves every material and validates the geometry
    #[tracing::instrument(name = "Layer stack builder", level = "debug", skip(self))]
    pub fn build(self) -> Result<LayerStack<T>, ConfigurationError> {
        let (ferroelectric, ferroelectric_thickness) = self.ferroelectric;
        let dead_layer_thickness = self.dead_layer_thickness.unwrap_or_else(T::zero);

        let mut specification = vec![
            LayerSpecification {
                name: "Bottom Electrode",
                material: &self.bottom_electrode,
                thickness: T::zero(),
                role: LayerRole::Electrode,
            },
            LayerSpecification {
                name: "Dead Layer",
                material: &ferroelectric,
                thickness: dead_layer_thickness,
                role: LayerRole::DeadLayer,
            },
            LayerSpecification {
                name: "Ferroelectric",
                material: &ferroelectric,
                thickness: ferroelectric_thickness,
                role: LayerRole::Ferroelectric,
            },
        ];
        if let Some((oxide, oxide_thickness)) = self.oxide.as_ref() {
            specification.push(LayerSpecification {
                name: "Insulating Layer",
                material: oxide,
                thickness: *oxide_thickness,
                role: LayerRole::Oxide,
            });
        }
        specification.push(LayerSpecification {
            name: "Top Electrode",
            material: &self.top_electrode,
            thickness: T::zero(),
            role: LayerRole::Electrode,
        });

        LayerStack::from_specification(self.info_desk, &specification)
    }
}

struct LayerSpecification<'a, T> {
    name: &'static str,
    material: &'a str,
    thickness: T,
    role: LayerRole,
}

/// An ordered, validated, immutable sequence of layers
///
/// The first and last layers are zero-thickness electrodes with known work functions, every
/// active layer has a positive thickness and a known positive dielectric constant.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack<T> {
    layers: Vec<Layer<T>>,
    total_thickness: T,
    work_functions: [T; 2],
}

impl<T: Copy + RealField> LayerStack<T> {
    /// Builds the five layer bottom electrode / dead layer / ferroelectric / oxide / top
    /// electrode stack
    pub fn standard_structure<InfoDesk: MaterialInfoDesk<T>>(
        info_desk: &InfoDesk,
        structure: &StandardStructure<T>,
    ) -> Result<Self, ConfigurationError> {
        LayerStackBuilder::new()
            .with_info_desk(info_desk)
            .with_bottom_electrode(&structure.bottom_electrode)
            .with_top_electrode(&structure.top_electrode)
            .with_ferroelectric(&structure.ferroelectric, structure.ferroelectric_thickness)
            .with_dead_layer(structure.dead_layer_thickness)
            .with_oxide(&structure.oxide, structure.oxide_thickness)
            .build()
    }

    fn from_specification<InfoDesk: MaterialInfoDesk<T>>(
        info_desk: &InfoDesk,
        specification: &[LayerSpecification<'_, T>],
    ) -> Result<Self, ConfigurationError> {
        let mut layers = Vec::with_capacity(specification.len());
        let mut position = T::zero();
        for layer in specification {
            // Written so that NaN is rejected along with negative values
            if !(layer.thickness >= T::zero()) {
                return Err(ConfigurationError::NegativeThickness {
                    layer: layer.name.to_string(),
                    thickness: to_f64(layer.thickness),
                });
            }
            match layer.role {
                LayerRole::Electrode if layer.thickness != T::zero() => {
                    return Err(ConfigurationError::MalformedStack(format!(
                        "{} must have zero thickness",
                        layer.name
                    )));
                }
                LayerRole::Ferroelectric => {
                    ensure_positive(layer.thickness, "ferroelectric thickness")?;
                }
                _ => {}
            }

            let start = position;
            let end = position + layer.thickness;
            position = end;
            layers.push(Layer {
                name: layer.name,
                material: info_desk.material(layer.material),
                thickness: layer.thickness,
                role: layer.role,
                interval: start..end,
            });
        }

        let number_of_electrodes = layers
            .iter()
            .filter(|layer| layer.role == LayerRole::Electrode)
            .count();
        let (bottom, top) = match (layers.first(), layers.last()) {
            (Some(bottom), Some(top))
                if number_of_electrodes == 2
                    && bottom.role == LayerRole::Electrode
                    && top.role == LayerRole::Electrode =>
            {
                (bottom, top)
            }
            _ => {
                return Err(ConfigurationError::MalformedStack(
                    "a stack needs exactly two electrodes, one at each end".into(),
                ))
            }
        };
        let work_functions = [
            bottom.material.require_work_function()?,
            top.material.require_work_function()?,
        ];

        for layer in layers.iter().filter(|layer| layer.is_active()) {
            let dielectric_constant = layer.material.require_dielectric_constant()?;
            ensure_positive(dielectric_constant, "dielectric constant")?;
        }

        tracing::debug!(
            layers = layers.len(),
            total_thickness = to_f64(position),
            "Assembled layer stack"
        );

        Ok(Self {
            layers,
            total_thickness: position,
            work_functions,
        })
    }

    /// Every layer, electrodes and inactive layers included, in order along the device axis
    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }

    /// The layers with a spatial extent, in order
    pub fn active_layers(&self) -> impl Iterator<Item = &Layer<T>> + '_ {
        self.layers.iter().filter(|layer| layer.is_active())
    }

    /// The active layer with the given index, which is also its mesh region index
    pub fn active_layer(&self, region: usize) -> Option<&Layer<T>> {
        self.active_layers().nth(region)
    }

    /// The first layer with the given role, whether active or not
    ///
    /// For `LayerRole::Electrode` this is the bottom electrode.
    pub fn layer(&self, role: LayerRole) -> Option<&Layer<T>> {
        self.layers.iter().find(|layer| layer.role == role)
    }

    /// Thickness of the layer with the given role, zero when it is absent
    pub fn thickness_of(&self, role: LayerRole) -> T {
        self.layer(role)
            .map(|layer| layer.thickness)
            .unwrap_or_else(T::zero)
    }

    /// The electrode at the origin
    pub fn bottom_electrode(&self) -> &Layer<T> {
        &self.layers[0]
    }

    /// The electrode at the far end of the active region
    pub fn top_electrode(&self) -> &Layer<T> {
        &self.layers[self.layers.len() - 1]
    }

    /// Sum of the thicknesses of all non-electrode layers, in m
    pub fn total_thickness(&self) -> T {
        self.total_thickness
    }

    /// The built-in voltage φ_bottom − φ_top, in V
    pub fn built_in_voltage(&self) -> T {
        self.work_functions[0] - self.work_functions[1]
    }

    /// Discretises the active region into `number_of_points` vertices
    ///
    /// Cells are shared between the active layers in proportion to their thickness and every
    /// layer interface is a vertex, so the returned mesh region `i` is `active_layer(i)`.
    pub fn mesh(&self, number_of_points: usize) -> Result<Mesh1d<T>, ConfigurationError> {
        let widths: Vec<T> = self.active_layers().map(|layer| layer.thickness).collect();
        let minimum = widths.len() + 1;
        if number_of_points < minimum {
            return Err(ConfigurationError::TooFewGridPoints {
                requested: number_of_points,
                layers: widths.len(),
                minimum,
            });
        }
        create_line_segment_mesh_1d_from_regions(&widths, number_of_points - 1, &Vector1::zeros())
            .map_err(|e| ConfigurationError::MalformedStack(e.to_string()))
    }

    /// The vertex positions of `mesh`, in m
    pub fn position_grid(&self, number_of_points: usize) -> Result<DVector<T>, ConfigurationError> {
        Ok(DVector::from_vec(self.mesh(number_of_points)?.coordinates()))
    }

    /// The active layer containing `position`
    ///
    /// Layer intervals are half-open, except for the last active layer which also owns the top
    /// of the active region.
    pub fn layer_at(&self, position: T) -> Result<&Layer<T>, LookupError> {
        let mut active = self.active_layers().peekable();
        while let Some(layer) = active.next() {
            let is_last = active.peek().is_none();
            if layer.contains(position) || (is_last && position == layer.end()) {
                return Ok(layer);
            }
        }
        Err(LookupError::OutsideStack {
            position: to_f64(position),
            total_thickness: to_f64(self.total_thickness),
        })
    }
}

impl<T: Copy + RealField> std::fmt::Display for LayerStack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Ferroelectric Diode Structure")?;
        writeln!(
            f,
            "Total active thickness: {:.2} nm",
            to_f64(self.total_thickness) / NANOMETRE
        )?;
        writeln!(f, "Built-in voltage: {:.3} V", to_f64(self.built_in_voltage()))?;
        writeln!(f, "\nLayers:")?;
        for layer in self.layers.iter() {
            let thickness = match layer.role {
                LayerRole::Electrode => "electrode".to_string(),
                _ => format!("{:.1} nm", to_f64(layer.thickness) / NANOMETRE),
            };
            let work_function = match layer.material.work_function() {
                Some(value) => format!("{:.2} eV", to_f64(value)),
                None => "N/A".to_string(),
            };
            writeln!(
                f,
                "  {} ({}): {}, WF: {}",
                layer.name,
                layer.material.id(),
                thickness,
                work_function
            )?;
        }
        Ok(())
    }
}
