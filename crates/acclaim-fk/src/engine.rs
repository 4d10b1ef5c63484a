//! Frame evaluation

use std::collections::BTreeMap;

use acclaim_amc::{Frame, FrameNumber, Motion};
use acclaim_asf::{ROOT, Skeleton};
use acclaim_data::{Channel, DMat3, DVec3};
use log::{debug, warn};

use crate::error::{FkError, Result};
use crate::options::{DirectionCorrections, FkOptions};
use crate::pose::Pose;
use crate::transform::{BoneTransform, dof_rotation};
use crate::traversal::{Joint, Visit, traverse};

/// Forward kinematics for one skeleton
///
/// Construction computes a [`BoneTransform`] for every bone. Each call to
/// [`evaluate`](Self::evaluate) then walks the hierarchy for one frame and
/// returns a new [`Pose`].
///
/// # Examples
///
/// ```
/// use acclaim_amc::Frame;
/// use acclaim_asf::parse_skeleton;
/// use acclaim_fk::ForwardKinematics;
///
/// let skeleton = parse_skeleton(
///     ":bonedata\nbegin\nname femur\ndirection 0 -1 0\nlength 4\ndof rx\nend\n:hierarchy\nbegin\nroot femur\nend\n",
/// )?;
/// let fk = ForwardKinematics::new(skeleton)?;
///
/// let frame: Frame = [("root", vec![0.0, 10.0, 0.0]), ("femur", vec![0.0])].into_iter().collect();
/// let pose = fk.evaluate(&frame)?;
/// assert_eq!(pose.get("femur").unwrap().end.y, 6.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ForwardKinematics {
    skeleton: Skeleton,
    transforms: BTreeMap<String, BoneTransform>,
    options: FkOptions,
}

impl ForwardKinematics {
    /// Prepare `skeleton` with default options
    pub fn new(skeleton: Skeleton) -> Result<Self> {
        Self::with_options(skeleton, FkOptions::default())
    }

    /// Prepare `skeleton` with explicit options
    pub fn with_options(skeleton: Skeleton, options: FkOptions) -> Result<Self> {
        let corrections = options
            .corrections
            .clone()
            .unwrap_or_else(|| DirectionCorrections::from_naming_convention(&skeleton));

        let transforms = skeleton
            .bones
            .values()
            .map(|bone| {
                BoneTransform::for_bone(bone, corrections.flips_z(&bone.name))
                    .map(|transform| (bone.name.clone(), transform))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        debug!(
            "Prepared {} bone transform(s), {} direction correction(s)",
            transforms.len(),
            corrections.len()
        );

        Ok(Self {
            skeleton,
            transforms,
            options,
        })
    }

    /// The skeleton being posed
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Options in effect
    pub fn options(&self) -> &FkOptions {
        &self.options
    }

    /// All precomputed transforms keyed by bone name
    pub fn transforms(&self) -> &BTreeMap<String, BoneTransform> {
        &self.transforms
    }

    /// Precomputed transform of one bone
    pub fn transform(&self, bone: &str) -> Option<&BoneTransform> {
        self.transforms.get(bone)
    }

    /// Pose the skeleton for one frame
    pub fn evaluate(&self, frame: &Frame) -> Result<Pose> {
        let root = frame.channel(ROOT).unwrap_or_default();
        let origin = Joint {
            position: DVec3::new(value(root, 0), value(root, 1), value(root, 2)),
            rotation: if self.options.apply_root_orientation {
                self.root_rotation(root)
            } else {
                DMat3::IDENTITY
            },
        };

        traverse(&self.skeleton, origin, |visit, from| match visit {
            Visit::Bone(bone) => {
                let Some(transform) = self.transforms.get(&bone.name) else {
                    debug!("No transform for '{}'; skipping", bone.name);
                    return Ok(None);
                };

                let values = frame.channel(&bone.name).unwrap_or_default();
                if self.options.strict && values.len() != bone.dof.len() {
                    return Err(FkError::ChannelCountMismatch {
                        bone: bone.name.clone(),
                        expected: bone.dof.len(),
                        found: values.len(),
                    });
                }

                let rotation = from.rotation * transform.local(dof_rotation(&bone.dof, values));
                let position = from.position + rotation * transform.direction * bone.length;
                Ok(Some(Joint { position, rotation }))
            }
            Visit::Missing { parent, bone } => {
                if self.options.strict {
                    return Err(FkError::MissingBone {
                        parent: parent.to_string(),
                        bone: bone.to_string(),
                    });
                }
                debug!("'{parent}' lists undefined child '{bone}'; skipping subtree");
                Ok(None)
            }
            Visit::Revisited(bone) => {
                if self.options.strict {
                    return Err(FkError::CyclicHierarchy {
                        bone: bone.to_string(),
                    });
                }
                warn!("'{bone}' reached more than once; hierarchy is not a tree");
                Ok(None)
            }
        })
    }

    /// Pose the skeleton for frame `number` of `motion`
    pub fn evaluate_frame(&self, motion: &Motion, number: FrameNumber) -> Result<Pose> {
        let frame = motion
            .frame(number)
            .ok_or(FkError::MissingFrame(number))?;
        self.evaluate(frame)
    }

    /// Pose every frame of `motion`
    ///
    /// Frames are evaluated in parallel when the `parallel` feature is enabled.
    /// The first error encountered is returned.
    pub fn evaluate_all(&self, motion: &Motion) -> Result<BTreeMap<FrameNumber, Pose>> {
        debug!("Evaluating {} frame(s)", motion.frame_count());
        self.evaluate_frames(motion)
    }

    #[cfg(feature = "parallel")]
    fn evaluate_frames(&self, motion: &Motion) -> Result<BTreeMap<FrameNumber, Pose>> {
        use rayon::prelude::*;

        motion
            .frames
            .par_iter()
            .map(|(number, frame)| self.evaluate(frame).map(|pose| (*number, pose)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_frames(&self, motion: &Motion) -> Result<BTreeMap<FrameNumber, Pose>> {
        motion
            .iter()
            .map(|(number, frame)| self.evaluate(frame).map(|pose| (number, pose)))
            .collect()
    }

    /// Rotation from the root channels named in the root `order`, in declared order
    fn root_rotation(&self, root: &[f64]) -> DMat3 {
        self.skeleton
            .root_order()
            .iter()
            .enumerate()
            .fold(DMat3::IDENTITY, |matrix, (index, name)| {
                match Channel::parse(name).and_then(Channel::rotation_axis) {
                    Some(axis) => matrix * axis.rotation(value(root, index)),
                    None => matrix,
                }
            })
    }
}

fn value(values: &[f64], index: usize) -> f64 {
    values.get(index).copied().unwrap_or(0.0)
}
