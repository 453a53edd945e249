use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::DemoError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Kernels use
/// `#import shaderlab::frame::{...}` to pull in the uniform layout and ray
/// helpers. The composer produces `naga::Module` IR directly, skipping WGSL
/// re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/fullscreen.wgsl"),
        file_path: "modules/fullscreen.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/frame.wgsl"),
        file_path: "modules/frame.wgsl",
    },
];

fn describe(error: &ComposerError, file_path: &str) -> DemoError {
    DemoError::Shader(format!("{file_path}: {error}"))
}

impl ShaderComposer {
    /// Create a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, DemoError> {
        let mut composer = Composer::default();

        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| describe(&e, m.file_path))?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Shader`] if composition or validation fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, DemoError> {
        let naga_module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu
    /// shader module. Useful for testing shader composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, DemoError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| describe(&e, file_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Kernel;
    use crate::renderer::kernel_source;

    fn validate(module: &naga::Module) {
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        let _ = validator
            .validate(module)
            .unwrap_or_else(|e| panic!("validation failed: {e:?}"));
    }

    #[test]
    fn all_kernels_compose_and_validate() {
        let mut composer = ShaderComposer::new().unwrap();
        for kernel in [Kernel::Scene, Kernel::Spotlight, Kernel::Plasma] {
            let (source, file_path) = kernel_source(kernel);
            let module = composer
                .compose_naga(source, file_path)
                .unwrap_or_else(|e| panic!("{kernel} failed to compose: {e}"));
            assert!(
                module.entry_points.iter().any(|ep| ep.name == "cs_main"),
                "{kernel} has no cs_main"
            );
            validate(&module);
        }
    }

    #[test]
    fn blit_composes_and_validates() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(
                include_str!("../../assets/shaders/screen/blit.wgsl"),
                "screen/blit.wgsl",
            )
            .unwrap();
        let names: Vec<_> =
            module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
        validate(&module);
    }

    #[test]
    fn bad_import_is_a_shader_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga(
                "#import shaderlab::missing::Thing\n@compute @workgroup_size(1) fn cs_main() {}",
                "broken.wgsl",
            )
            .unwrap_err();
        assert!(matches!(err, DemoError::Shader(ref msg) if msg.contains("broken.wgsl")));
    }
}
