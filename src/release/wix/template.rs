//! Installer manifest template constant.

/// Handlebars template for the installer manifest document.
///
/// The nested directory/component tree and the component reference list are
/// pre-rendered XML blocks (`directory_tree`, `component_refs`); everything
/// else is scalar metadata. All values are escaped before rendering, the
/// template engine itself runs with escaping disabled.
pub const WXS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Wix xmlns="http://schemas.microsoft.com/wix/2006/wi">
  <Product Id="*"
           Name="{{product_name}}"
           Manufacturer="{{manufacturer}}"
           Version="{{version}}"
           Language="1033"
           Codepage="1252"
           UpgradeCode="{{upgrade_code}}">

    <Package Keywords="Installer"
             Description="{{description}}"
             Manufacturer="{{manufacturer}}"
             InstallerVersion="450"
             Platform="{{platform}}"
             Languages="1033"
             Compressed="yes"
             SummaryCodepage="1252" />

    <MajorUpgrade DowngradeErrorMessage="A newer version of {{product_name}} is already installed." />
    <Media Id="1" Cabinet="media1.cab" EmbedCab="yes" />
{{#if icon}}
    <Icon Id="ProductIcon" SourceFile="{{icon}}" />
    <Property Id="ARPPRODUCTICON" Value="ProductIcon" />
{{/if}}
{{#if homepage}}
    <Property Id="ARPURLINFOABOUT" Value="{{homepage}}" />
{{/if}}
    <Directory Id="TARGETDIR" Name="SourceDir">
      <Directory Id="{{program_files_id}}">
        <Directory Id="INSTALLDIR" Name="{{install_dir_name}}">
{{directory_tree}}        </Directory>
      </Directory>
{{#if shortcut}}
      <Directory Id="ProgramMenuFolder">
        <Directory Id="ApplicationProgramsFolder" Name="{{product_name}}" />
      </Directory>
{{/if}}
    </Directory>
{{#if shortcut}}
    <DirectoryRef Id="ApplicationProgramsFolder">
      <Component Id="ApplicationShortcut" Guid="{{shortcut.guid}}">
        <Shortcut Id="ApplicationStartMenuShortcut"
                  Name="{{product_name}}"
                  Target="[INSTALLDIR]{{shortcut.target}}"
                  WorkingDirectory="INSTALLDIR" />
        <RemoveFolder Id="RemoveApplicationProgramsFolder" Directory="ApplicationProgramsFolder" On="uninstall" />
        <RegistryValue Root="HKCU" Key="Software\{{manufacturer}}\{{product_name}}" Name="installed" Type="integer" Value="1" KeyPath="yes" />
      </Component>
    </DirectoryRef>
{{/if}}
    <Feature Id="Complete" Title="{{product_name}}" Level="1">
{{component_refs}}{{#if shortcut}}      <ComponentRef Id="ApplicationShortcut" />
{{/if}}    </Feature>

    <UIRef Id="{{ui_ref}}" />
    <Property Id="WIXUI_INSTALLDIR" Value="INSTALLDIR" />
  </Product>
</Wix>
"#;
